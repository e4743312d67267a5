use std::time::Duration;

use async_trait::async_trait;
use ingestion_core::error::{IngestError, Result};
use ingestion_core::models::MetadataPatch;
use ingestion_core::ports::Catalog;
use reqwest::{StatusCode, Url};

/// HTTP adapter for the catalog service
pub struct CatalogClient {
    /// Base URL of the catalog service (e.g., "http://catalog:8080")
    base_url: Url,

    /// Path segments of the records resource below the base URL
    sub_path: Vec<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a new catalog client. `timeout` bounds every request.
    pub fn new(base_url: &str, sub_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| IngestError::ConfigInvalid {
            key: "catalog_url".to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(IngestError::ConfigInvalid {
                key: "catalog_url".to_string(),
                reason: format!("{} cannot be used as a base URL", base_url),
            });
        }

        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            IngestError::Internal(format!("Failed to build catalog HTTP client: {}", e))
        })?;

        Ok(Self {
            base_url,
            sub_path: sub_url.split('/').filter(|s| !s.is_empty()).map(String::from).collect(),
            client,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(&self.sub_path);
            path.extend(segments);
        }
        url
    }

    /// GET a catalog resource and map 200/404 to found/absent.
    async fn probe(&self, url: Url, what: &str) -> Result<bool> {
        tracing::debug!(url = %url, "Checking {} in catalog", what);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Catalog request failed");
            IngestError::catalog(format!("request to {} failed: {}", url, e))
        })?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(
                    url = %url,
                    status = %status,
                    body = %body,
                    "Got unexpected status code from catalog"
                );
                Err(IngestError::catalog(format!(
                    "unexpected status {} while checking {}",
                    status, what
                )))
            }
        }
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn exists(&self, identifier: &str) -> Result<bool> {
        self.probe(self.url(&[identifier]), "record existence").await
    }

    async fn product_exists(&self, product_id: &str) -> Result<bool> {
        self.probe(self.url(&["lastVersion", product_id]), "productId existence").await
    }

    async fn patch_metadata(
        &self,
        identifier: &str,
        patch: &MetadataPatch,
    ) -> Result<serde_json::Value> {
        let url = self.url(&[identifier]);
        tracing::debug!(url = %url, "Sending metadata update to catalog");

        let response = self.client.patch(url.clone()).json(patch).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Catalog request failed");
            IngestError::catalog(format!("request to {} failed: {}", url, e))
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %url,
                status = %status,
                body = %body,
                "Got unexpected status code from catalog"
            );
            return Err(IngestError::catalog(format!(
                "unexpected status {} while updating metadata",
                status
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed to parse catalog response");
            IngestError::catalog(format!("invalid catalog response: {}", e))
        })
    }
}
