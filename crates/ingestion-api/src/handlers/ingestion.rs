use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use ingestion_core::models::{IngestionRequest, JobHandle, SourcesRequest};

use crate::dto::ValidationResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_model(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IngestionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JobHandle>), ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        model_path = %request.model_path,
        tileset = %request.tileset_filename,
        "Processing ingestion request"
    );

    let handle = state.manager.create_model(request).await?;

    Ok((StatusCode::CREATED, Json(handle)))
}

pub async fn validate_sources(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SourcesRequest>, JsonRejection>,
) -> Result<Json<ValidationResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(model_path = %request.model_path, "Checking model sources");

    let outcome = state.manager.validate_model_sources(request).await?;

    Ok(Json(outcome.into()))
}
