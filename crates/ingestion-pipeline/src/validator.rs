use std::io::ErrorKind;
use std::path::{Component, Path};
use std::sync::Arc;

use async_trait::async_trait;
use ingestion_core::error::{IngestError, Result};
use ingestion_core::models::{NormalizedRequest, ValidationOutcome, PHOTO_REALISTIC_PRODUCT_TYPE};
use ingestion_core::ports::{Catalog, Validator};
use ingestion_geo::validate_footprint;

/// Validates ingestion requests against the storage mount and the catalog
pub struct ValidationManager {
    storage_base: String,
    catalog: Arc<dyn Catalog>,
}

impl ValidationManager {
    /// `storage_base` is the folder every adjusted model path must live under
    pub fn new(storage_base: impl Into<String>, catalog: Arc<dyn Catalog>) -> Self {
        Self { storage_base: storage_base.into(), catalog }
    }

    async fn validate_metadata(&self, request: &NormalizedRequest) -> Result<ValidationOutcome> {
        let metadata = &request.metadata;

        if metadata.product_name.trim().is_empty() {
            return Ok(ValidationOutcome::invalid("productName is required"));
        }

        if let Some(product_type) = &metadata.product_type {
            if product_type != PHOTO_REALISTIC_PRODUCT_TYPE {
                return Ok(ValidationOutcome::invalid(format!(
                    "Unsupported productType '{}', expected '{}'",
                    product_type, PHOTO_REALISTIC_PRODUCT_TYPE
                )));
            }
        }

        if let (Some(start), Some(end)) = (metadata.source_date_start, metadata.source_date_end) {
            if start > end {
                return Ok(ValidationOutcome::invalid(
                    "sourceDateStart should not be later than sourceDateEnd",
                ));
            }
        }

        if let (Some(min), Some(max)) = (metadata.min_resolution_meter, metadata.max_resolution_meter)
        {
            if min > max {
                return Ok(ValidationOutcome::invalid(
                    "minResolutionMeter should not be bigger than maxResolutionMeter",
                ));
            }
        }

        let footprint = metadata.footprint.clone();
        let footprint = tokio::task::spawn_blocking(move || validate_footprint(&footprint))
            .await
            .map_err(|e| IngestError::Internal(format!("Footprint validation failed: {}", e)))?;
        if let Some(summary) = footprint.summary() {
            return Ok(ValidationOutcome::invalid(format!("Invalid footprint: {}", summary)));
        }

        if let Some(product_id) = &metadata.product_id {
            if !self.catalog.product_exists(product_id).await? {
                return Ok(ValidationOutcome::invalid(format!(
                    "Record with productId: {} doesn't exist!",
                    product_id
                )));
            }
        }

        Ok(ValidationOutcome::Valid)
    }
}

#[async_trait]
impl Validator for ValidationManager {
    async fn validate_path(&self, model_path: &str) -> Result<ValidationOutcome> {
        if model_path.trim().is_empty() {
            return Ok(ValidationOutcome::invalid("modelPath is required"));
        }

        let path = Path::new(model_path);
        if !path.is_absolute() {
            return Ok(ValidationOutcome::invalid(format!(
                "Model path must be absolute, modelPath: {}",
                model_path
            )));
        }
        if path.components().any(|c| c == Component::ParentDir) {
            return Ok(ValidationOutcome::invalid(format!(
                "Model path must not contain '..', modelPath: {}",
                model_path
            )));
        }
        if !path.starts_with(&self.storage_base) {
            return Ok(ValidationOutcome::invalid(format!(
                "Unknown model path! The model isn't in the agreed folder!, modelPath: {}, basePath: {}",
                model_path, self.storage_base
            )));
        }

        Ok(ValidationOutcome::Valid)
    }

    async fn validate_sources(
        &self,
        model_path: &str,
        tileset_filename: &str,
    ) -> Result<ValidationOutcome> {
        let relative = Path::new(tileset_filename);
        if tileset_filename.trim().is_empty()
            || relative.is_absolute()
            || relative.components().any(|c| c == Component::ParentDir)
        {
            return Ok(ValidationOutcome::invalid(format!(
                "Invalid tileset filename: '{}'",
                tileset_filename
            )));
        }

        match tokio::fs::metadata(model_path).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Ok(ValidationOutcome::invalid(format!(
                    "Model path is not a folder, modelPath: {}",
                    model_path
                )))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(ValidationOutcome::invalid(format!(
                    "Unknown model path! The model doesn't exist, modelPath: {}",
                    model_path
                )))
            }
            Err(e) => return Err(probe_error(model_path, e)),
        }

        let tileset_path = Path::new(model_path).join(relative);
        let content = match tokio::fs::read_to_string(&tileset_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(ValidationOutcome::invalid(format!(
                    "Unknown tileset name! The tileset file isn't in the model folder, tilesetFilename: {}",
                    tileset_filename
                )))
            }
            Err(e) if e.kind() == ErrorKind::IsADirectory => {
                return Ok(ValidationOutcome::invalid(format!(
                    "Tileset is not a file, tilesetFilename: {}",
                    tileset_filename
                )))
            }
            Err(e) => return Err(probe_error(&tileset_path.display().to_string(), e)),
        };

        let tileset: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                return Ok(ValidationOutcome::invalid(format!(
                    "{} is not a valid JSON file: {}",
                    tileset_filename, e
                )))
            }
        };

        let missing: Vec<&str> =
            ["asset", "root"].into_iter().filter(|key| tileset.get(key).is_none()).collect();
        if !missing.is_empty() {
            return Ok(ValidationOutcome::invalid(format!(
                "{} is not a 3D Tiles tileset, missing: {}",
                tileset_filename,
                missing.join(", ")
            )));
        }

        Ok(ValidationOutcome::Valid)
    }

    async fn validate_full(&self, request: &NormalizedRequest) -> Result<ValidationOutcome> {
        let outcome = self.validate_path(&request.model_path).await?;
        if !outcome.is_valid() {
            return Ok(outcome);
        }

        let outcome = self.validate_sources(&request.model_path, &request.tileset_filename).await?;
        if !outcome.is_valid() {
            return Ok(outcome);
        }

        self.validate_metadata(request).await
    }
}

fn probe_error(path: &str, err: std::io::Error) -> IngestError {
    tracing::error!(path = %path, error = %err, "Failed to probe model sources");
    IngestError::Internal(format!("Failed to read {}: {}", path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ingestion_core::models::{MetadataPatch, ModelMetadata};
    use serde_json::json;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Catalog that knows a fixed set of products
    struct FakeCatalog {
        products: Vec<&'static str>,
        fail: bool,
        queried: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        fn with_products(products: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self { products, fail: false, queried: Mutex::new(Vec::new()) })
        }
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn exists(&self, _identifier: &str) -> Result<bool> {
            Ok(false)
        }

        async fn product_exists(&self, product_id: &str) -> Result<bool> {
            self.queried.lock().unwrap().push(product_id.to_string());
            if self.fail {
                return Err(IngestError::catalog("connection refused"));
            }
            Ok(self.products.contains(&product_id))
        }

        async fn patch_metadata(
            &self,
            _identifier: &str,
            _patch: &MetadataPatch,
        ) -> Result<serde_json::Value> {
            Ok(json!({}))
        }
    }

    const TILESET: &str = r#"{"asset":{"version":"1.0"},"geometricError":500,"root":{}}"#;

    /// Storage mount with one model folder holding a tileset
    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let model = dir.path().join("models").join("tlv");
            fs::create_dir_all(&model).unwrap();
            fs::write(model.join("tileset.json"), TILESET).unwrap();
            Self { dir }
        }

        fn base(&self) -> String {
            self.dir.path().display().to_string()
        }

        fn model_path(&self) -> String {
            format!("{}/models/tlv", self.base())
        }

        fn validator(&self, catalog: Arc<FakeCatalog>) -> ValidationManager {
            ValidationManager::new(self.base(), catalog)
        }

        fn request(&self, metadata: serde_json::Value) -> NormalizedRequest {
            let metadata: ModelMetadata<serde_json::Value> =
                serde_json::from_value(metadata).unwrap();
            let footprint = serde_json::from_value(json!({
                "type": "Polygon",
                "coordinates": [[[34.0, 32.0], [35.0, 32.0], [35.0, 33.0], [34.0, 32.0]]]
            }))
            .unwrap();
            NormalizedRequest::new(
                "/pv_in/models/tlv".to_string(),
                self.model_path(),
                "tileset.json".to_string(),
                metadata.with_footprint(footprint),
            )
        }
    }

    #[tokio::test]
    async fn test_validate_path() {
        let fixture = Fixture::new();
        let validator = fixture.validator(FakeCatalog::with_products(vec![]));

        assert!(validator.validate_path(&fixture.model_path()).await.unwrap().is_valid());

        let outcome = validator.validate_path("/elsewhere/model").await.unwrap();
        assert!(outcome.reason().unwrap().starts_with("Unknown model path!"));

        let outcome = validator.validate_path("relative/model").await.unwrap();
        assert!(!outcome.is_valid());

        let escape = format!("{}/../etc", fixture.base());
        assert!(!validator.validate_path(&escape).await.unwrap().is_valid());

        assert!(!validator.validate_path("").await.unwrap().is_valid());
    }

    #[tokio::test]
    async fn test_validate_sources() {
        let fixture = Fixture::new();
        let validator = fixture.validator(FakeCatalog::with_products(vec![]));
        let model = fixture.model_path();

        assert!(validator.validate_sources(&model, "tileset.json").await.unwrap().is_valid());

        let outcome = validator.validate_sources(&model, "missing.json").await.unwrap();
        assert!(outcome.reason().unwrap().starts_with("Unknown tileset name!"));

        let missing_model = format!("{}/models/nope", fixture.base());
        let outcome = validator.validate_sources(&missing_model, "tileset.json").await.unwrap();
        assert!(outcome.reason().unwrap().contains("doesn't exist"));

        let outcome = validator.validate_sources(&model, "../tileset.json").await.unwrap();
        assert!(!outcome.is_valid());
    }

    #[tokio::test]
    async fn test_validate_sources_checks_tileset_content() {
        let fixture = Fixture::new();
        let validator = fixture.validator(FakeCatalog::with_products(vec![]));
        let model = fixture.model_path();

        fs::write(Path::new(&model).join("broken.json"), "{ not json").unwrap();
        let outcome = validator.validate_sources(&model, "broken.json").await.unwrap();
        assert!(outcome.reason().unwrap().contains("not a valid JSON"));

        fs::write(Path::new(&model).join("plain.json"), r#"{"asset":{}}"#).unwrap();
        let outcome = validator.validate_sources(&model, "plain.json").await.unwrap();
        assert!(outcome.reason().unwrap().ends_with("missing: root"));
    }

    #[tokio::test]
    async fn test_validate_full_accepts_valid_request() {
        let fixture = Fixture::new();
        let catalog = FakeCatalog::with_products(vec!["tlv-product"]);
        let validator = fixture.validator(catalog.clone());

        let request = fixture.request(json!({
            "productName": "Tel Aviv",
            "productId": "tlv-product",
            "productType": "3DPhotoRealistic",
            "sourceDateStart": "2023-01-01T00:00:00Z",
            "sourceDateEnd": "2023-06-01T00:00:00Z",
            "minResolutionMeter": 0.1,
            "maxResolutionMeter": 0.5,
            "footprint": null
        }));

        let outcome = validator.validate_full(&request).await.unwrap();
        assert!(outcome.is_valid(), "{:?}", outcome);
        assert_eq!(*catalog.queried.lock().unwrap(), vec!["tlv-product".to_string()]);
    }

    #[tokio::test]
    async fn test_validate_full_metadata_rules() {
        let fixture = Fixture::new();
        let validator = fixture.validator(FakeCatalog::with_products(vec![]));

        let cases = [
            (json!({ "productName": " ", "footprint": null }), "productName is required"),
            (
                json!({ "productName": "m", "productType": "Orthophoto", "footprint": null }),
                "Unsupported productType",
            ),
            (
                json!({
                    "productName": "m",
                    "sourceDateStart": "2024-01-01T00:00:00Z",
                    "sourceDateEnd": "2023-01-01T00:00:00Z",
                    "footprint": null
                }),
                "sourceDateStart should not be later",
            ),
            (
                json!({
                    "productName": "m",
                    "minResolutionMeter": 2.0,
                    "maxResolutionMeter": 1.0,
                    "footprint": null
                }),
                "minResolutionMeter should not be bigger",
            ),
            (
                json!({ "productName": "m", "productId": "unknown", "footprint": null }),
                "Record with productId: unknown doesn't exist!",
            ),
        ];

        for (metadata, expected) in cases {
            let outcome = validator.validate_full(&fixture.request(metadata)).await.unwrap();
            let reason = outcome.reason().unwrap_or_default().to_string();
            assert!(reason.starts_with(expected), "expected '{}', got '{}'", expected, reason);
        }
    }

    #[tokio::test]
    async fn test_validate_full_rejects_bad_footprint() {
        let fixture = Fixture::new();
        let validator = fixture.validator(FakeCatalog::with_products(vec![]));

        let mut request = fixture.request(json!({ "productName": "m", "footprint": null }));
        request.metadata.footprint = serde_json::from_value(json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]]
        }))
        .unwrap();

        let outcome = validator.validate_full(&request).await.unwrap();
        assert!(outcome.reason().unwrap().contains("self-intersect"));
    }

    #[tokio::test]
    async fn test_validate_full_rejects_oversized_footprint() {
        let fixture = Fixture::new();
        let validator = fixture.validator(FakeCatalog::with_products(vec![]));

        let count = ingestion_geo::MAX_FOOTPRINT_VERTICES;
        let mut ring: Vec<Vec<f64>> =
            (0..count).map(|k| vec![34.0 + k as f64 * 1e-4, 32.0 + (k % 2) as f64 * 1e-4]).collect();
        ring.push(ring[0].clone());

        let mut request = fixture.request(json!({ "productName": "m", "footprint": null }));
        request.metadata.footprint = serde_json::from_value(json!({
            "type": "Polygon",
            "coordinates": [ring]
        }))
        .unwrap();

        let outcome = validator.validate_full(&request).await.unwrap();
        assert_eq!(
            outcome.reason(),
            Some("Invalid footprint: Polygon: Footprint has 10001 vertices, at most 10000 are allowed")
        );
    }

    #[tokio::test]
    async fn test_validate_full_stops_at_first_failure() {
        let fixture = Fixture::new();
        let catalog = FakeCatalog::with_products(vec![]);
        let validator = fixture.validator(catalog.clone());

        let mut request =
            fixture.request(json!({ "productName": "m", "productId": "p", "footprint": null }));
        request.tileset_filename = "missing.json".to_string();

        let outcome = validator.validate_full(&request).await.unwrap();
        assert!(!outcome.is_valid());
        assert!(catalog.queried.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure_is_an_error() {
        let fixture = Fixture::new();
        let catalog = Arc::new(FakeCatalog {
            products: vec![],
            fail: true,
            queried: Mutex::new(Vec::new()),
        });
        let validator = fixture.validator(catalog);

        let request =
            fixture.request(json!({ "productName": "m", "productId": "p", "footprint": null }));
        let err = validator.validate_full(&request).await.unwrap_err();
        assert!(matches!(err, IngestError::CatalogUnavailable { .. }));
    }
}
