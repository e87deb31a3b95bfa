//! WebServer-specific error types

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use roster::StoreError;
use serde_json::json;
use shared::SharedError;
use thiserror::Error;

use crate::form::FieldError;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("HTTP server startup failed on {address}: {message}")]
    ServerStartupFailed { address: SocketAddr, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] SharedError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type WebServerResult<T> = Result<T, WebServerError>;

/// Errors returned to HTTP clients
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Unknown filter key: {key}")]
    UnknownFilter { key: String },

    #[error("{message}")]
    Store { message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnknownFilter { .. } => StatusCode::BAD_REQUEST,
            ApiError::Store { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(fields) => json!({
                "error": self.to_string(),
                "fields": fields,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::Validation(Vec::new()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::UnknownFilter { key: "grade".to_string() }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Store { message: "down".to_string() }.status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_store_error_message_is_passed_through() {
        let error = ApiError::Store {
            message: "Failed to add student. Please try again later.".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to add student. Please try again later.");
    }
}
