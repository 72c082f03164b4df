//! Error types for quake-feed
//!
//! This module provides the error taxonomy for the load pipeline:
//! - Transport failures (`NetworkError`), classified at the fetcher boundary
//! - Structural decode failures (`DecodeError`)
//! - The per-invocation failure type carried by a load outcome (`LoadError`)
//!
//! Malformed *data* inside an individual feed element never surfaces here —
//! the decoder defaults the field and moves on. Only malformed *structure*
//! becomes a [`DecodeError`].

use thiserror::Error;

/// Result type alias for quake-feed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for quake-feed
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Network round trip failed
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Feed document could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Transport-level failures, produced by the fetcher
///
/// Every network fault is caught at the fetcher boundary and converted into
/// one of these variants; none propagate as panics. There is no
/// retryable/non-retryable distinction — a failed fetch is terminal for its
/// load invocation.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The request URL could not be parsed; no connection was attempted
    #[error("malformed request URL: {url}")]
    MalformedUrl {
        /// The URL string that failed to parse
        url: String,
    },

    /// The server answered with a status other than 200
    #[error("unexpected HTTP status {code}")]
    HttpStatus {
        /// The HTTP status code returned by the server
        code: u16,
    },

    /// Transport failure: timeout, refused connection, DNS failure,
    /// interrupted stream
    #[error("I/O failure: {detail}")]
    Io {
        /// Description of the underlying transport failure
        detail: String,
    },
}

/// Decode failures, produced when the feed document itself is malformed
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document is not a JSON object with a `features` array of
    /// `properties`-bearing elements
    #[error("malformed feed document: {detail}")]
    Structural {
        /// Description of the structural malformation
        detail: String,
    },
}

/// The failure carried by a load outcome
///
/// Keeps the network/decode distinction intact; presentation layers that
/// merge the two for display can still branch on [`LoadError::kind`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The network round trip failed; the decoder was never invoked
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The body was fetched but could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Coarse classification of a load failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The network round trip failed
    Network,
    /// The fetched document could not be decoded
    Decode,
}

impl LoadError {
    /// Classify this failure as network or decode
    pub fn kind(&self) -> FailureKind {
        match self {
            LoadError::Network(_) => FailureKind::Network,
            LoadError::Decode(_) => FailureKind::Decode,
        }
    }
}
