use std::sync::Arc;

use ingestion_clients::{CatalogClient, StoreTriggerClient};
use ingestion_core::error::Result;
use ingestion_core::PathNormalizer;
use ingestion_pipeline::{ModelManager, ValidationManager};

use crate::config::ApiConfig;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<ModelManager>,
}

impl AppState {
    pub fn new(manager: Arc<ModelManager>) -> Self {
        Self { manager }
    }

    /// Wire the HTTP adapters and the pipeline from resolved configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let catalog = CatalogClient::new(
            &config.catalog_url,
            &config.catalog_sub_url,
            config.request_timeout,
        )?;
        let trigger = StoreTriggerClient::new(&config.store_trigger_url, config.request_timeout)?;

        let normalizer =
            PathNormalizer::new(&config.source_base_path, &config.storage_base_path);
        let validator =
            ValidationManager::new(normalizer.storage_base(), Arc::new(catalog));

        let manager = ModelManager::new(normalizer, Arc::new(validator), Arc::new(trigger));
        Ok(Self::new(Arc::new(manager)))
    }
}
