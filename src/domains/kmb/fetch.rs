//! Single-attempt JSON fetching.
//!
//! `ApiFetcher` is the seam between the lookup layer and the network. The
//! production implementation wraps one shared `reqwest::Client`; tests swap in
//! an in-memory double.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::core::config::ApiConfig;

/// Fetches a URL and returns its JSON body.
///
/// Implementations never fail: any error is returned as an
/// `{"error": "<description>"}` object instead.
#[async_trait]
pub trait ApiFetcher: Send + Sync {
    /// Perform one GET against `url`.
    async fn fetch(&self, url: &str) -> Value;
}

/// `ApiFetcher` backed by reqwest. No retries, no backoff.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured request timeout.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("kmb-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { http })
    }

    async fn try_fetch(&self, url: &str) -> Result<Value, ApiError> {
        let response = self.http.get(url).send().await.map_err(ApiError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                ApiError::unexpected(e.to_string())
            } else {
                ApiError::Request(e)
            }
        })
    }
}

#[async_trait]
impl ApiFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Value {
        debug!("GET {}", url);
        match self.try_fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Upstream request failed: {}", e);
                e.into_response()
            }
        }
    }
}
