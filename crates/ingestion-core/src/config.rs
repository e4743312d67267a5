use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the ingestion service
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub port: ConfigValue<u16>,
    pub cors_origin: ConfigValue<String>,
    pub catalog_url: ConfigValue<String>,
    pub catalog_sub_url: ConfigValue<String>,
    pub store_trigger_url: ConfigValue<String>,
    pub source_base_path: ConfigValue<String>,
    pub storage_base_path: ConfigValue<String>,
    pub request_timeout_secs: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let default = |v: &str| ConfigValue::new(v.to_string(), ConfigSource::Default);
        Self {
            port: ConfigValue::new(3000, ConfigSource::Default),
            cors_origin: default("http://localhost:3000"),
            catalog_url: default("http://localhost:8080"),
            catalog_sub_url: default("metadata"),
            store_trigger_url: default("http://localhost:8081"),
            source_base_path: default("/pv_in"),
            storage_base_path: default("/store"),
            request_timeout_secs: ConfigValue::new(30, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| IngestError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| IngestError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(port) = file_config.port {
            self.port.update(port, ConfigSource::File);
        }
        if let Some(cors_origin) = file_config.cors_origin {
            self.cors_origin.update(cors_origin, ConfigSource::File);
        }

        if let Some(catalog) = file_config.catalog {
            if let Some(url) = catalog.url {
                self.catalog_url.update(url, ConfigSource::File);
            }
            if let Some(sub_url) = catalog.sub_url {
                self.catalog_sub_url.update(sub_url, ConfigSource::File);
            }
        }

        if let Some(store_trigger) = file_config.store_trigger {
            if let Some(url) = store_trigger.url {
                self.store_trigger_url.update(url, ConfigSource::File);
            }
        }

        if let Some(paths) = file_config.paths {
            if let Some(base) = paths.source_base {
                self.source_base_path.update(base, ConfigSource::File);
            }
            if let Some(base) = paths.storage_base {
                self.storage_base_path.update(base, ConfigSource::File);
            }
        }

        if let Some(timeout) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(timeout, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Some(port) = parsed_env("INGESTION_PORT", "expected a port number") {
            self.port.update(port, ConfigSource::Environment);
        }

        let strings = [
            ("INGESTION_CORS_ORIGIN", &mut self.cors_origin),
            ("INGESTION_CATALOG_URL", &mut self.catalog_url),
            ("INGESTION_CATALOG_SUB_URL", &mut self.catalog_sub_url),
            ("INGESTION_STORE_TRIGGER_URL", &mut self.store_trigger_url),
            ("INGESTION_SOURCE_BASE_PATH", &mut self.source_base_path),
            ("INGESTION_STORAGE_BASE_PATH", &mut self.storage_base_path),
        ];
        for (key, target) in strings {
            if let Ok(value) = env::var(key) {
                target.update(value, ConfigSource::Environment);
            }
        }

        if let Some(timeout) =
            parsed_env("INGESTION_REQUEST_TIMEOUT_SECS", "expected a number of seconds")
        {
            self.request_timeout_secs.update(timeout, ConfigSource::Environment);
        }

        self
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("port".to_string(), (self.port.value.to_string(), self.port.source));
        map.insert(
            "request_timeout_secs".to_string(),
            (self.request_timeout_secs.value.to_string(), self.request_timeout_secs.source),
        );

        for (key, value) in [
            ("cors_origin", &self.cors_origin),
            ("catalog_url", &self.catalog_url),
            ("catalog_sub_url", &self.catalog_sub_url),
            ("store_trigger_url", &self.store_trigger_url),
            ("source_base_path", &self.source_base_path),
            ("storage_base_path", &self.storage_base_path),
        ] {
            map.insert(key.to_string(), (value.value.clone(), value.source));
        }

        map
    }
}

fn parsed_env<T: FromStr>(key: &str, expected: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}': {}", key, raw, expected);
            None
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    port: Option<u16>,
    cors_origin: Option<String>,
    request_timeout_secs: Option<u64>,
    catalog: Option<CatalogSection>,
    store_trigger: Option<StoreTriggerSection>,
    paths: Option<PathsSection>,
}

#[derive(Debug, Deserialize, Serialize)]
struct CatalogSection {
    url: Option<String>,
    sub_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
struct StoreTriggerSection {
    url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
struct PathsSection {
    source_base: Option<String>,
    storage_base: Option<String>,
}
