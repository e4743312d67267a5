use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metadata::ModelMetadata;
use super::request::NormalizedRequest;

/// Unit of work handed to the store-trigger service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub model_id: Uuid,
    pub path_to_tileset: String,
    pub tileset_filename: String,
    pub metadata: ModelMetadata,
}

impl WorkOrder {
    /// Build the order for a validated request.
    ///
    /// `path_to_tileset` is expected in the trigger's path namespace, i.e.
    /// with the storage prefix already stripped.
    pub fn new(model_id: Uuid, request: NormalizedRequest, path_to_tileset: String) -> Self {
        Self {
            model_id,
            path_to_tileset,
            tileset_filename: request.tileset_filename,
            metadata: request.metadata,
        }
    }
}

/// Job status as reported by the store-trigger service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    #[serde(rename = "pending", alias = "Pending")]
    Pending,
    #[serde(rename = "in-progress", alias = "In-Progress")]
    InProgress,
    #[serde(rename = "completed", alias = "Completed")]
    Completed,
    #[serde(rename = "failed", alias = "Failed")]
    Failed,
}

/// Acknowledgement returned by the store-trigger service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    #[serde(rename = "jobID")]
    pub job_id: String,
    pub status: OperationStatus,
}

impl JobHandle {
    pub fn in_progress(job_id: impl Into<String>) -> Self {
        Self { job_id: job_id.into(), status: OperationStatus::InProgress }
    }
}

/// Compensating request asking the trigger service to remove a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub model_id: Uuid,
    pub model_link: String,
}
