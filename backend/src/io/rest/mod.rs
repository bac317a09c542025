//! # REST API Interface Layer
//!
//! One module per area, each exposing a `router()` that is merged under
//! `/api`. Handlers stay free of business logic.

pub mod activity_apis;
pub mod daily_log_apis;
pub mod logging_apis;
pub mod pattern_apis;

use axum::{http::StatusCode, response::IntoResponse, response::Response};
use tracing::error;

use crate::domain::ActivityError;

/// Translate a domain error into an HTTP response
pub fn activity_error_response(err: ActivityError) -> Response {
    let status = match &err {
        ActivityError::NotFound(_) => StatusCode::NOT_FOUND,
        e if e.is_validation() => StatusCode::BAD_REQUEST,
        _ => {
            error!("Activity operation failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string()).into_response()
}
