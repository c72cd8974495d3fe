//! Presentation state
//!
//! Searches write their progress into a [`SearchState`] through a small set of
//! actions. Every search is tagged with a generation number when it begins;
//! actions carrying an older generation are dropped, so a slow response from
//! a superseded search can never overwrite a newer one.

use crate::coord::{OriginSource, ResultSet, SearchOrigin};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

/// Everything a rendering surface needs to draw the current search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Incremented by every search; 0 before the first one
    pub generation: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<SearchOrigin>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultSet>,

    pub loading: bool,

    /// General error channel (lookups, places)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Device positioning error channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_error: Option<String>,
}

/// A state transition reported by a running search
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    OriginResolved { generation: u64, origin: SearchOrigin },
    ResultsLoaded { generation: u64, results: ResultSet },
    SearchFailed { generation: u64, message: String },
    LocationFailed { generation: u64, message: String },
}

impl Action {
    pub fn generation(&self) -> u64 {
        match self {
            Self::OriginResolved { generation, .. }
            | Self::ResultsLoaded { generation, .. }
            | Self::SearchFailed { generation, .. }
            | Self::LocationFailed { generation, .. } => *generation,
        }
    }
}

impl SearchState {
    /// Start a new search, superseding any in flight
    ///
    /// Clears the previous origin, results and errors. Returns the new
    /// search's generation.
    pub fn begin(&mut self, source: OriginSource) -> u64 {
        self.generation += 1;
        self.origin = None;
        self.results = None;
        self.error = None;
        self.location_error = None;
        self.loading = true;
        debug!(generation = self.generation, source = %source, "search started");
        self.generation
    }

    /// Apply an action; returns false if it belonged to a superseded search
    pub fn apply(&mut self, action: Action) -> bool {
        if action.generation() != self.generation {
            debug!(
                stale = action.generation(),
                current = self.generation,
                "dropping stale search update"
            );
            return false;
        }

        match action {
            Action::OriginResolved { origin, .. } => {
                self.origin = Some(origin);
            }
            Action::ResultsLoaded { results, .. } => {
                self.results = Some(results);
                self.loading = false;
            }
            Action::SearchFailed { message, .. } => {
                self.error = Some(message);
                self.loading = false;
            }
            Action::LocationFailed { message, .. } => {
                self.location_error = Some(message);
                self.loading = false;
            }
        }
        true
    }

    /// Facilities of the current results, empty when there are none
    pub fn facilities(&self) -> &[crate::coord::Facility] {
        self.results
            .as_ref()
            .map(|r| r.facilities.as_slice())
            .unwrap_or(&[])
    }

    /// The message of whichever error channel is set
    pub fn failure(&self) -> Option<&str> {
        self.location_error.as_deref().or(self.error.as_deref())
    }
}

/// Shared, lock-protected [`SearchState`]
///
/// The lock is only held for the duration of a single transition, never
/// across provider I/O.
#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<SearchState>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn begin(&self, source: OriginSource) -> u64 {
        self.inner.write().await.begin(source)
    }

    pub async fn dispatch(&self, action: Action) -> bool {
        self.inner.write().await.apply(action)
    }

    pub async fn snapshot(&self) -> SearchState {
        self.inner.read().await.clone()
    }
}
