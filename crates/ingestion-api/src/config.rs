use std::env;
use std::time::Duration;

use ingestion_core::config::LayeredConfig;
use ingestion_core::error::Result;

/// Environment variable naming an optional TOML config file
pub const CONFIG_FILE_ENV: &str = "INGESTION_CONFIG";

/// Log directives used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "ingestion_api=info,ingestion_pipeline=info,\
ingestion_clients=info,ingestion_core=info,tower_http=debug";

/// API server configuration resolved from defaults, file and environment
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub catalog_url: String,
    pub catalog_sub_url: String,
    pub store_trigger_url: String,
    pub source_base_path: String,
    pub storage_base_path: String,
    pub request_timeout: Duration,
    layered: LayeredConfig,
}

impl ApiConfig {
    /// Load configuration, reading `INGESTION_CONFIG` first when set
    pub fn load() -> Result<Self> {
        let mut layered = LayeredConfig::with_defaults();
        if let Ok(path) = env::var(CONFIG_FILE_ENV) {
            layered = layered.load_from_file(path)?;
        }
        Ok(Self::from_layered(layered.load_from_env()))
    }

    pub fn from_layered(layered: LayeredConfig) -> Self {
        Self {
            port: layered.port.value,
            cors_origin: layered.cors_origin.value.clone(),
            catalog_url: layered.catalog_url.value.clone(),
            catalog_sub_url: layered.catalog_sub_url.value.clone(),
            store_trigger_url: layered.store_trigger_url.value.clone(),
            source_base_path: layered.source_base_path.value.clone(),
            storage_base_path: layered.storage_base_path.value.clone(),
            request_timeout: Duration::from_secs(layered.request_timeout_secs.value),
            layered,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Logs every resolved value together with where it came from
    pub fn log_resolved(&self) {
        let mut entries: Vec<_> = self.layered.to_inspection_map().into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, (value, source)) in entries {
            tracing::info!(key = %key, value = %value, source = ?source, "Resolved configuration");
        }
    }
}
