use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Ingestion
        .route("/api/v1/ingestion", post(handlers::create_model))
        .route("/api/v1/ingestion/validate-sources", post(handlers::validate_sources))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
