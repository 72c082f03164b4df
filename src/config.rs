//! Configuration types for quake-feed

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

/// Network behavior configuration for the HTTP fetcher
///
/// Used to build the [`crate::fetch::HttpFetcher`]'s underlying client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connect timeout (default: 15 seconds)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: Duration,

    /// Whole-request timeout covering the response read (default: 10 seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// User-Agent header sent with feed requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    "quake-feed".to_string()
}

/// Feed query configuration, assembled into the request URL
///
/// Mirrors the settings surface of the consuming application: a base
/// endpoint plus a minimum-magnitude threshold and a sort order. The loader
/// itself accepts an already-assembled URL string; this type is the
/// convenience that assembles one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Base query endpoint (default: the USGS fdsnws event service)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Minimum magnitude threshold, forwarded as `minmag`
    #[serde(default = "default_min_magnitude")]
    pub min_magnitude: String,

    /// Sort order, forwarded as `orderby` (e.g. "time", "magnitude")
    #[serde(default = "default_order_by")]
    pub order_by: String,

    /// Maximum number of events requested, forwarded as `limit`
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            min_magnitude: default_min_magnitude(),
            order_by: default_order_by(),
            limit: default_limit(),
        }
    }
}

fn default_base_url() -> String {
    "https://earthquake.usgs.gov/fdsnws/event/1/query".to_string()
}

fn default_min_magnitude() -> String {
    "6".to_string()
}

fn default_order_by() -> String {
    "time".to_string()
}

fn default_limit() -> u32 {
    20
}

impl QueryConfig {
    /// Assemble the feed request URL
    ///
    /// Appends `format=geojson`, `limit`, `minmag`, and `orderby` to the
    /// base endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL cannot be parsed.
    pub fn to_url(&self) -> Result<String> {
        let mut url = url::Url::parse(&self.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL {}: {}", self.base_url, e),
            key: Some("base_url".to_string()),
        })?;

        url.query_pairs_mut()
            .append_pair("format", "geojson")
            .append_pair("limit", &self.limit.to_string())
            .append_pair("minmag", &self.min_magnitude)
            .append_pair("orderby", &self.order_by);

        Ok(url.into())
    }
}
