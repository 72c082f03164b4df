//! # quake-feed
//!
//! Cancellable fetch-decode pipeline for the USGS earthquake GeoJSON feed.
//!
//! ## Design Philosophy
//!
//! quake-feed is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Single-flight** - One outcome per load; a newer load supersedes a
//!   running one, and stale results are never delivered
//! - **Tolerant of bad data** - A malformed field in one event never fails
//!   the batch; only a structurally malformed document does
//! - **Explicit about emptiness** - "query matched nothing" and "query
//!   could not run" are distinct outcomes
//!
//! ## Quick Start
//!
//! ```no_run
//! use quake_feed::{FeedLoader, FetchConfig, LoadOutcome, QueryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = QueryConfig::default().to_url()?;
//!     let loader = FeedLoader::with_http(&FetchConfig::default())?;
//!
//!     let handle = loader.load(Some(url));
//!     match handle.outcome().await {
//!         Some(LoadOutcome::Success(records)) => {
//!             for record in records {
//!                 println!("M{:.1} {}", record.magnitude, record.place);
//!             }
//!         }
//!         Some(LoadOutcome::Failure(err)) => eprintln!("load failed: {err}"),
//!         None => {} // cancelled or superseded by a newer load
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Feed document decoding
pub mod decode;
/// Display-field derivation for list rows
pub mod display;
/// Error types
pub mod error;
/// Network round trip
pub mod fetch;
/// Load orchestration
pub mod loader;
/// Core types
pub mod types;

pub use config::{FetchConfig, QueryConfig};
pub use decode::decode;
pub use error::{DecodeError, Error, FailureKind, LoadError, NetworkError, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use loader::{FeedLoader, LoadHandle};
pub use types::{FALLBACK_DETAIL_URL, LoadOutcome, LoadState, Record};
