use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Serialize;
use shared::LogEntry;
use tracing::{debug, error, info, warn};

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub success: bool,
}

/// Create a router for frontend log forwarding
pub fn router() -> Router<AppState> {
    Router::new().route("/logs", post(log_message))
}

/// Write a frontend log line into the backend log
pub async fn log_message(
    State(_app_state): State<AppState>,
    Json(request): Json<LogEntry>,
) -> Result<Json<LogResponse>, StatusCode> {
    let component = request.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, request.message);

    match request.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message),
    }

    Ok(Json(LogResponse { success: true }))
}
