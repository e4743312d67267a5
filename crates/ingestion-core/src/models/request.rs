use geojson::Geometry;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::metadata::ModelMetadata;

/// Raw, untrusted request to ingest a new model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionRequest {
    pub model_path: String,
    pub tileset_filename: String,
    pub metadata: ModelMetadata<Value>,
}

/// Request for the dry-run sources check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesRequest {
    pub model_path: String,
    pub tileset_filename: String,
}

impl From<&IngestionRequest> for SourcesRequest {
    fn from(request: &IngestionRequest) -> Self {
        Self {
            model_path: request.model_path.clone(),
            tileset_filename: request.tileset_filename.clone(),
        }
    }
}

/// Ingestion request after path normalization and footprint decoding.
///
/// `metadata.product_source` always holds the path exactly as the caller
/// submitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRequest {
    pub original_model_path: String,
    pub model_path: String,
    pub tileset_filename: String,
    pub metadata: ModelMetadata<Geometry>,
}

impl NormalizedRequest {
    pub fn new(
        original_model_path: String,
        model_path: String,
        tileset_filename: String,
        metadata: ModelMetadata<Geometry>,
    ) -> Self {
        let metadata = ModelMetadata {
            product_source: Some(original_model_path.clone()),
            ..metadata
        };
        Self { original_model_path, model_path, tileset_filename, metadata }
    }
}
