use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Local;
use serde::Deserialize;
use tracing::{info, warn};

use super::activity_error_response;
use crate::domain::time_math::parse_date;
use crate::AppState;

// Query parameters for the daily log API
#[derive(Debug, Deserialize)]
pub struct DailyLogQuery {
    /// YYYY-MM-DD; today when omitted
    pub date: Option<String>,
}

/// Create a router for the single-day log
pub fn router() -> Router<AppState> {
    Router::new().route("/daily-log", get(get_daily_log))
}

/// Get one day's activities with wake windows and totals
async fn get_daily_log(
    State(state): State<AppState>,
    Query(query): Query<DailyLogQuery>,
) -> impl IntoResponse {
    info!("GET /api/daily-log - query: {:?}", query);

    let date = match query.date.as_deref() {
        Some(raw) => match parse_date(raw) {
            Some(date) => date,
            None => {
                warn!("Rejected daily log date: {}", raw);
                return (StatusCode::BAD_REQUEST, "Invalid date, expected YYYY-MM-DD").into_response();
            }
        },
        None => Local::now().date_naive(),
    };

    let records = match state.activity_service.list_activities() {
        Ok(records) => records,
        Err(e) => return activity_error_response(e),
    };

    let log = state.daily_log_service.daily_log(&records, date);
    (StatusCode::OK, Json(log)).into_response()
}
