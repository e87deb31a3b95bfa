//! Table store error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store request failed: {message}")]
    Transport { message: String },

    #[error("Store responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Store response could not be decoded: {message}")]
    Decode { message: String },

    #[error("Store returned no row for insert into {table}")]
    EmptyInsertResponse { table: String },

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Store client configuration error")]
    Config(#[from] SharedError),
}

impl StoreError {
    pub fn transport(message: impl Into<String>) -> Self {
        StoreError::Transport { message: message.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable { message: message.into() }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode { message: err.to_string() }
        } else {
            StoreError::Transport { message: err.to_string() }
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
