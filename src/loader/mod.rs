//! Load orchestration — single-flight, cancellable composition of fetch and
//! decode
//!
//! Each call to [`FeedLoader::load`] is one invocation: a background tokio
//! task performs the network round trip and the decode, then delivers exactly
//! one [`LoadOutcome`] through the returned [`LoadHandle`]. An invocation
//! that has been cancelled, or superseded because a newer load bumped the
//! shared generation counter, discards its outcome instead — never two
//! outcomes for one consumer, never a stale outcome after a newer load has
//! started.
//!
//! The consumer awaits the handle on its own task; that task is the
//! designated completion context, and fetch/decode never run on it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::FetchConfig;
use crate::decode::decode;
use crate::error::{LoadError, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::types::{LoadOutcome, LoadState};


/// Single-flight feed loader
///
/// Cloneable: clones share the generation counter, so a load started through
/// any clone supersedes loads started through the others.
#[derive(Clone)]
pub struct FeedLoader {
    fetcher: Arc<dyn Fetcher>,
    /// Current generation token. The only mutable state shared between the
    /// invoking context and background units; a background unit compares its
    /// bound token against this at delivery time.
    generation: Arc<AtomicU64>,
}

impl FeedLoader {
    /// Create a loader around the given fetcher
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a loader backed by the production HTTP fetcher
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Config`] if the HTTP client cannot be
    /// built.
    pub fn with_http(config: &FetchConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::new(config)?)))
    }

    /// Start one load invocation
    ///
    /// Bumps the generation counter, which supersedes any invocation still
    /// running for this loader. With `None` (no query configured) the handle
    /// resolves immediately to an empty success without any network access —
    /// nothing to load is not an error.
    pub fn load(&self, url: Option<String>) -> LoadHandle {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (outcome_tx, outcome_rx) = oneshot::channel();
        let cancel = CancellationToken::new();
        let state = Arc::new(AtomicU8::new(LoadState::Idle.as_u8()));

        let Some(url) = url else {
            debug!(generation, "load requested without a URL, delivering empty success");
            state.store(LoadState::Delivered.as_u8(), Ordering::SeqCst);
            let _ = outcome_tx.send(LoadOutcome::Success(Vec::new()));
            return LoadHandle {
                generation,
                cancel,
                state,
                outcome_rx,
            };
        };

        let fetcher = Arc::clone(&self.fetcher);
        let current = Arc::clone(&self.generation);
        let token = cancel.clone();
        let task_state = Arc::clone(&state);

        state.store(LoadState::Running.as_u8(), Ordering::SeqCst);
        tokio::spawn(async move {
            debug!(generation, url = %url, "load started");

            let outcome = match fetcher.fetch(&url).await {
                Ok(body) => match decode(&body) {
                    Ok(records) => LoadOutcome::Success(records),
                    Err(e) => LoadOutcome::Failure(LoadError::Decode(e)),
                },
                Err(e) => LoadOutcome::Failure(LoadError::Network(e)),
            };

            // Staleness and cancellation are checked at completion time;
            // an in-flight fetch is never forcibly interrupted.
            if token.is_cancelled() || current.load(Ordering::SeqCst) != generation {
                debug!(generation, "load superseded or cancelled, discarding outcome");
                let _ = task_state.compare_exchange(
                    LoadState::Running.as_u8(),
                    LoadState::Cancelled.as_u8(),
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                );
                return;
            }

            // Running -> Delivered transitions exactly once; losing the race
            // to a concurrent cancel() means the outcome must be discarded.
            match task_state.compare_exchange(
                LoadState::Running.as_u8(),
                LoadState::Delivered.as_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => {
                    if outcome_tx.send(outcome).is_err() {
                        debug!(generation, "load handle dropped before delivery");
                    }
                }
                Err(_) => {
                    debug!(generation, "load cancelled at delivery, discarding outcome");
                }
            }
        });

        LoadHandle {
            generation,
            cancel,
            state,
            outcome_rx,
        }
    }
}

/// Handle to one load invocation
///
/// Await [`LoadHandle::outcome`] on the consuming task to receive the
/// terminal [`LoadOutcome`]; drop or cancel the handle to discard it.
pub struct LoadHandle {
    generation: u64,
    cancel: CancellationToken,
    state: Arc<AtomicU8>,
    outcome_rx: oneshot::Receiver<LoadOutcome>,
}

impl LoadHandle {
    /// The generation token bound to this invocation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current lifecycle state of this invocation
    pub fn state(&self) -> LoadState {
        LoadState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Cooperatively cancel this invocation
    ///
    /// Prevents delivery of the outcome. An in-flight network read is
    /// allowed to finish; its result is discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
        // Only a still-running invocation transitions to Cancelled; a
        // delivered outcome stays delivered.
        let _ = self.state.compare_exchange(
            LoadState::Running.as_u8(),
            LoadState::Cancelled.as_u8(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    /// Await the terminal outcome on the calling task
    ///
    /// Returns `None` when the invocation was cancelled or superseded before
    /// delivery.
    pub async fn outcome(self) -> Option<LoadOutcome> {
        self.outcome_rx.await.ok()
    }
}
