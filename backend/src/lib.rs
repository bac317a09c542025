//! # Sleep Log Backend
//!
//! Contains all non-UI logic for the infant sleep and feeding log.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (any HTTP client)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (wake windows, midnight split, daily log, pattern chart)
//!     ↓
//! Storage Layer (in-memory activity store)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{ActivityService, DailyLogService, PatternChartService};
use crate::storage::InMemoryActivityStore;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub activity_service: ActivityService<InMemoryActivityStore>,
    pub daily_log_service: DailyLogService,
    pub pattern_chart_service: PatternChartService,
}

impl AppState {
    /// State backed by the given store, with default chart settings
    pub fn with_store(store: InMemoryActivityStore) -> Self {
        Self {
            activity_service: ActivityService::new(store),
            daily_log_service: DailyLogService::new(),
            pattern_chart_service: PatternChartService::new(),
        }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> AppState {
    info!("Setting up activity store");
    let store = InMemoryActivityStore::new();

    info!("Setting up domain model");
    let activity_service = ActivityService::new(store);
    let daily_log_service = DailyLogService::new();
    let pattern_chart_service = PatternChartService::with_config((&config.chart).into());

    info!("Setting up application state");
    AppState {
        activity_service,
        daily_log_service,
        pattern_chart_service,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: Option<&str>) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    let cors = match cors_origin {
        Some(origin) => cors.allow_origin(origin.parse::<HeaderValue>()?),
        None => cors.allow_origin(Any),
    };

    let api_routes = Router::new()
        .merge(io::rest::activity_apis::router())
        .merge(io::rest::daily_log_apis::router())
        .merge(io::rest::pattern_apis::router())
        .merge(io::rest::logging_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
