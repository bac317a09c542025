use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use shared::QuickRange;
use tracing::{info, warn};

use super::activity_error_response;
use crate::domain::time_math::parse_date;
use crate::domain::{PatternChartService, ShiftDirection};
use crate::AppState;

// Query parameters for the pattern chart API
#[derive(Debug, Deserialize)]
pub struct PatternQuery {
    /// First visible date; wins over `range`
    pub start_date: Option<String>,
    pub range: Option<QuickRange>,
    /// Move the resolved window one day
    pub shift: Option<ShiftDirection>,
}

/// Create a router for the multi-day pattern chart
pub fn router() -> Router<AppState> {
    Router::new().route("/pattern", get(get_pattern_window))
}

fn resolve_start_date(
    service: &PatternChartService,
    query: &PatternQuery,
    today: NaiveDate,
) -> Result<NaiveDate, String> {
    let start = match (&query.start_date, query.range) {
        (Some(raw), _) => parse_date(raw).ok_or_else(|| format!("Invalid start_date '{}'", raw))?,
        (None, Some(range)) => service.quick_start_date(range, today),
        (None, None) => service.quick_start_date(QuickRange::Recent, today),
    };

    Ok(match query.shift {
        Some(direction) => service.shift_start_date(start, direction),
        None => start,
    })
}

/// Get the chart columns for the requested window
async fn get_pattern_window(
    State(state): State<AppState>,
    Query(query): Query<PatternQuery>,
) -> impl IntoResponse {
    info!("GET /api/pattern - query: {:?}", query);

    let today = Local::now().date_naive();
    let start = match resolve_start_date(&state.pattern_chart_service, &query, today) {
        Ok(start) => start,
        Err(message) => {
            warn!("Rejected pattern query: {}", message);
            return (StatusCode::BAD_REQUEST, message).into_response();
        }
    };

    let records = match state.activity_service.list_activities() {
        Ok(records) => records,
        Err(e) => return activity_error_response(e),
    };

    let window = state.pattern_chart_service.build_window(&records, start);
    (StatusCode::OK, Json(window)).into_response()
}
