use std::time::Duration;

use async_trait::async_trait;
use ingestion_core::error::{IngestError, Result};
use ingestion_core::models::{DeleteRequest, JobHandle, WorkOrder};
use ingestion_core::ports::StoreTrigger;
use uuid::Uuid;

/// HTTP adapter for the store-trigger service
pub struct StoreTriggerClient {
    /// Base URL of the store-trigger service
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl StoreTriggerClient {
    /// Create a new store-trigger client. `timeout` bounds every request.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            IngestError::Internal(format!("Failed to build store-trigger HTTP client: {}", e))
        })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

#[async_trait]
impl StoreTrigger for StoreTriggerClient {
    async fn submit(&self, order: &WorkOrder) -> Result<JobHandle> {
        let url = self.endpoint("ingestion");
        tracing::debug!(url = %url, model_id = %order.model_id, "Submitting work order");

        let response = self
            .client
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| IngestError::trigger(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::trigger(format!(
                "store-trigger API error ({}): {}",
                status, body
            )));
        }

        response
            .json::<JobHandle>()
            .await
            .map_err(|e| IngestError::trigger(format!("Failed to parse store-trigger response: {}", e)))
    }

    async fn request_delete(&self, model_id: Uuid, model_link: &str) {
        let url = self.endpoint("delete");
        let request = DeleteRequest { model_id, model_link: model_link.to_string() };
        tracing::info!(url = %url, model_id = %model_id, "Requesting model deletion");

        match self.client.post(&url).json(&request).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(model_id = %model_id, "Delete request accepted");
            }
            Ok(response) => {
                tracing::warn!(
                    model_id = %model_id,
                    status = %response.status(),
                    "Store-trigger rejected delete request"
                );
            }
            Err(e) => {
                tracing::warn!(model_id = %model_id, error = %e, "Delete request failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_trim_trailing_slash() {
        let client = StoreTriggerClient::new("http://trigger:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint("ingestion"), "http://trigger:8080/ingestion");
        assert_eq!(client.endpoint("delete"), "http://trigger:8080/delete");
    }
}
