//! Fetching the capabilities document.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Abstraction over the transport used to obtain the capabilities document.
///
/// The provider issues exactly one fetch per instance; implementations do
/// not need to cache or retry.
#[async_trait]
pub trait CapabilitiesFetcher: Send + Sync {
    /// Fetch the document body at `url`.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP-backed capabilities fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with default timeouts.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a fetcher using an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CapabilitiesFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server responded with status {code}")]
    Status { code: u16 },
}
