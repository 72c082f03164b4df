//! Network round trip for the feed document
//!
//! The [`Fetcher`] trait is the seam between the loader and the network,
//! enabling stub implementations in tests. [`HttpFetcher`] is the production
//! implementation: one GET per call, full body read, every transport fault
//! classified into a [`NetworkError`].

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::FetchConfig;
use crate::error::{Error, NetworkError, Result};

/// Abstraction over the feed network round trip, enabling testability
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the raw document at `url` and return the body text
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] for a malformed URL, a non-200 status, or
    /// any transport failure. No retries are attempted.
    async fn fetch(&self, url: &str) -> std::result::Result<String, NetworkError>;
}

/// Production [`Fetcher`] backed by a shared reqwest client
///
/// The client enforces the configured connect and request timeouts;
/// connection and stream resources are scoped to each request future and
/// released on every exit path.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher from the given network configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {}", e),
                key: None,
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, NetworkError> {
        // Reject a malformed URL before any connection is attempted
        let url = reqwest::Url::parse(url).map_err(|_| NetworkError::MalformedUrl {
            url: url.to_string(),
        })?;

        debug!(url = %url, "fetching feed document");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| NetworkError::Io {
                detail: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            warn!(url = %url, code = status, "feed request rejected by server");
            return Err(NetworkError::HttpStatus { code: status });
        }

        let body = response.text().await.map_err(|e| NetworkError::Io {
            detail: e.to_string(),
        })?;

        debug!(url = %url, bytes = body.len(), "feed document received");
        Ok(body)
    }
}
