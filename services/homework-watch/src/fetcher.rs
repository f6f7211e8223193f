//! Homework status API client

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::PracticumConfig;
use crate::io::HttpClient;
use crate::WatchError;

/// Source of raw homework status responses
#[async_trait]
pub trait StatusSource: Send + Sync + std::fmt::Debug {
    /// Fetch submissions modified since `from_date` (seconds since epoch)
    async fn fetch(&self, from_date: i64) -> crate::Result<serde_json::Value>;
}

/// Client for the Practicum homework status endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &PracticumConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", config.token),
            http,
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> crate::Result<serde_json::Value> {
        let from_date = from_date.to_string();
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
            .map_err(|e| WatchError::ApiUnavailable(e.to_string()))?;

        if response.status != 200 {
            return Err(WatchError::ApiUnavailable(format!(
                "endpoint returned status {}",
                response.status
            )));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| WatchError::ApiUnavailable(format!("response is not valid JSON: {}", e)))
    }
}
