//! External search index collaborator.
//!
//! The directory only issues one call: remove a service document when the
//! service is deactivated. Callers treat the call as best-effort and must
//! not fail the surrounding request on error.

use crate::{config::SearchIndexConfig, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait SearchIndexClient: Send + Sync {
    /// Remove the document for a service by id.
    async fn remove_service(&self, service_id: i64) -> Result<()>;
}

pub struct HttpSearchIndexClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpSearchIndexClient {
    pub fn new(config: &SearchIndexConfig, base_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl SearchIndexClient for HttpSearchIndexClient {
    async fn remove_service(&self, service_id: i64) -> Result<()> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), service_id);

        let mut request = self.http.delete(&url);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::ExternalService(format!("search index removal failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::ExternalService(format!(
                "search index removal returned {}",
                response.status()
            )));
        }

        tracing::debug!(service_id, "removed service from search index");
        Ok(())
    }
}

/// Used when no index is configured; removals succeed silently.
pub struct NoopSearchIndexClient;

#[async_trait]
impl SearchIndexClient for NoopSearchIndexClient {
    async fn remove_service(&self, service_id: i64) -> Result<()> {
        tracing::debug!(service_id, "search index not configured, skipping removal");
        Ok(())
    }
}
