//! REST API handlers
//!
//! JSON endpoints over the shared roster store

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use roster::core::ADD_FAILED_MESSAGE;
use roster::{RosterState, RosterStore, TableStore};
use shared::{Component, FilterKey, Student, component_debug, component_warn};

use crate::error::ApiError;
use crate::form::{AddStudentForm, FormOptions};
use crate::types::{FilterValue, HealthResponse};

/// Current roster state - GET /api/students
pub async fn list_students<S>(State(roster): State<Arc<RosterStore<S>>>) -> Json<RosterState>
where
    S: TableStore + 'static,
{
    Json(roster.snapshot())
}

/// Re-read the store - POST /api/students/refresh
pub async fn refresh_students<S>(State(roster): State<Arc<RosterStore<S>>>) -> Json<RosterState>
where
    S: TableStore + 'static,
{
    roster.fetch_students().await;
    Json(roster.snapshot())
}

/// Create a student - POST /api/students
pub async fn add_student<S>(
    State(roster): State<Arc<RosterStore<S>>>,
    Json(form): Json<AddStudentForm>,
) -> Result<(StatusCode, Json<Student>), ApiError>
where
    S: TableStore + 'static,
{
    let candidate = form.into_new_student().map_err(|errors| {
        component_debug!(Component::WebServer, "📝 Rejected form with {} field errors", errors.len());
        ApiError::Validation(errors)
    })?;

    match roster.add_student(candidate).await {
        Some(student) => Ok((StatusCode::CREATED, Json(student))),
        None => Err(ApiError::Store {
            message: roster.error().unwrap_or_else(|| ADD_FAILED_MESSAGE.to_string()),
        }),
    }
}

/// Set one filter - PUT /api/filters/:key
pub async fn set_filter<S>(
    State(roster): State<Arc<RosterStore<S>>>,
    Path(key): Path<String>,
    Json(body): Json<FilterValue>,
) -> Result<Json<RosterState>, ApiError>
where
    S: TableStore + 'static,
{
    let filter_key = FilterKey::from_str(&key).map_err(|_| {
        component_warn!(Component::WebServer, "⚠️ Unknown filter key '{}'", key);
        ApiError::UnknownFilter { key: key.clone() }
    })?;

    roster.set_filter(filter_key, body.value);
    Ok(Json(roster.snapshot()))
}

/// Clear every filter - DELETE /api/filters
pub async fn reset_filters<S>(State(roster): State<Arc<RosterStore<S>>>) -> Json<RosterState>
where
    S: TableStore + 'static,
{
    roster.reset_filters();
    Json(roster.snapshot())
}

/// Form option lists - GET /api/form
pub async fn form_options() -> Json<FormOptions> {
    Json(FormOptions::default())
}

/// Health check endpoint
pub async fn health_check<S>(State(roster): State<Arc<RosterStore<S>>>) -> Json<HealthResponse>
where
    S: TableStore + 'static,
{
    let state = roster.snapshot();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        students: state.students().len(),
        loading: state.loading(),
    })
}
