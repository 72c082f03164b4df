//! Core types for quake-feed

use serde::{Deserialize, Serialize};

use crate::error::{FailureKind, LoadError};

/// Detail URL used when an event carries no `url` of its own
pub const FALLBACK_DETAIL_URL: &str = "https://earthquake.usgs.gov/earthquakes/map/";

/// One decoded seismic event
///
/// Constructed only by the decoder, immutable thereafter. `magnitude` and
/// `time_ms` are always populated after a successful decode (defaulted when
/// the source omitted them, never left unset), and `detail_url` is never
/// empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Event headline (may be empty)
    #[serde(default)]
    pub title: String,

    /// Free-text location description
    pub place: String,

    /// Event magnitude; 0.0 when the source omitted it
    pub magnitude: f64,

    /// Hypocenter depth in kilometers; 0.0 when the source omitted it
    #[serde(default)]
    pub depth_km: f64,

    /// Event time, Unix epoch milliseconds
    pub time_ms: i64,

    /// Number of "Did You Feel It?" reports; `None` when the source omitted
    /// it (distinct from a reported count of zero)
    #[serde(default)]
    pub felt_reports: Option<u32>,

    /// Link to the event detail page; falls back to
    /// [`FALLBACK_DETAIL_URL`] when the source has none
    pub detail_url: String,
}

/// Terminal result of one load invocation
///
/// Produced exactly once per non-superseded invocation; the sole channel
/// through which the loader communicates with its caller. An empty record
/// list is a valid success ("query matched nothing"), distinct from any
/// failure ("query could not run") — consumers must not collapse the two.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The feed was fetched and decoded; the list may be empty
    Success(Vec<Record>),
    /// The fetch or the decode failed
    Failure(LoadError),
}

impl LoadOutcome {
    /// The decoded records, if this outcome is a success
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            LoadOutcome::Success(records) => Some(records),
            LoadOutcome::Failure(_) => None,
        }
    }

    /// The failure classification, if this outcome is a failure
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            LoadOutcome::Success(_) => None,
            LoadOutcome::Failure(err) => Some(err.kind()),
        }
    }
}

/// Lifecycle of one load invocation
///
/// `Delivered` and `Cancelled` are terminal; an invocation reaches exactly
/// one of them, exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Created, background unit not yet dispatched
    Idle,
    /// Background unit dispatched, outcome pending
    Running,
    /// Outcome delivered through the handle
    Delivered,
    /// Cancelled or superseded; no outcome will be delivered
    Cancelled,
}

impl LoadState {
    /// Encode for atomic storage
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            LoadState::Idle => 0,
            LoadState::Running => 1,
            LoadState::Delivered => 2,
            LoadState::Cancelled => 3,
        }
    }

    /// Decode from atomic storage; unknown values map to `Idle`
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            1 => LoadState::Running,
            2 => LoadState::Delivered,
            3 => LoadState::Cancelled,
            _ => LoadState::Idle,
        }
    }
}
