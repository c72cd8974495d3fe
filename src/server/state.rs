//! Server shared state
//!
//! Holds the search driver and the presentation state shared by all clients.

use crate::search::Search;
use crate::state::Store;

/// Shared state for the HTTP server
pub struct AppState<S> {
    /// Runs searches
    pub locator: S,

    /// The single presentation state every search writes to
    pub store: Store,
}

impl<S: Search> AppState<S> {
    /// Create new application state
    pub fn new(locator: S) -> Self {
        Self {
            locator,
            store: Store::new(),
        }
    }
}
