use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{JobHandle, MetadataPatch, NormalizedRequest, ValidationOutcome, WorkOrder};

/// Port for request validation
///
/// Invalid input is reported as [`ValidationOutcome::Invalid`]. `Err` is
/// reserved for infrastructure failures hit while probing sources.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Structural check of an adjusted model path
    async fn validate_path(&self, model_path: &str) -> Result<ValidationOutcome>;

    /// Check that the model directory and tileset file are present and readable
    async fn validate_sources(
        &self,
        model_path: &str,
        tileset_filename: &str,
    ) -> Result<ValidationOutcome>;

    /// Full payload check: path, sources and metadata consistency
    async fn validate_full(&self, request: &NormalizedRequest) -> Result<ValidationOutcome>;
}

/// Port for the catalog of ingested products
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Whether a record with this identifier exists
    async fn exists(&self, identifier: &str) -> Result<bool>;

    /// Whether any version of this product exists
    async fn product_exists(&self, product_id: &str) -> Result<bool>;

    /// Apply a partial metadata update and return the updated record
    async fn patch_metadata(
        &self,
        identifier: &str,
        patch: &MetadataPatch,
    ) -> Result<serde_json::Value>;
}

/// Port for the tileset processing trigger
#[async_trait]
pub trait StoreTrigger: Send + Sync {
    /// Submit a work order. Single shot, no retry.
    async fn submit(&self, order: &WorkOrder) -> Result<JobHandle>;

    /// Ask the trigger service to remove a model. Failures are not reported.
    async fn request_delete(&self, model_id: Uuid, model_link: &str);
}
