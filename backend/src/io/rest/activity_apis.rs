use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{CreateActivityRequest, UpdateActivityRequest};
use tracing::info;

use super::activity_error_response;
use crate::AppState;

/// Create a router for activity CRUD APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/:id",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
}

/// List every activity with the wake window that preceded it
async fn list_activities(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/activities");

    match state.activity_service.list_with_wake_times() {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => activity_error_response(e),
    }
}

async fn get_activity(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/activities/{}", id);

    match state.activity_service.get_activity(&id) {
        Ok(activity) => (StatusCode::OK, Json(activity)).into_response(),
        Err(e) => activity_error_response(e),
    }
}

async fn create_activity(
    State(state): State<AppState>,
    Json(request): Json<CreateActivityRequest>,
) -> impl IntoResponse {
    info!("POST /api/activities - request: {:?}", request);

    match state.activity_service.create_activity(request) {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => activity_error_response(e),
    }
}

async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateActivityRequest>,
) -> impl IntoResponse {
    info!("PUT /api/activities/{} - request: {:?}", id, request);

    match state.activity_service.update_activity(&id, request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => activity_error_response(e),
    }
}

async fn delete_activity(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/activities/{}", id);

    match state.activity_service.delete_activity(&id) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => activity_error_response(e),
    }
}
