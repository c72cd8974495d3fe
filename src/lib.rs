//! hospital-locator: Nearby Hospital Search
//!
//! A library and CLI tool that finds hospitals around an address or the
//! current position, then lists them nearest first with their addresses.
//!
//! ## Features
//!
//! - Forward geocoding (OpenCage) and device positioning (IP geolocation)
//! - Places lookup for hospitals within a radius (Geoapify)
//! - Concurrent reverse geocoding of every result (Nominatim)
//! - Haversine distances, stable distance ordering
//! - Presentation state with stale-search protection
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use hospital_locator::coord::distance::{distance_km, round_km};
//! use hospital_locator::Coordinates;
//!
//! let origin = Coordinates::new(40.0, -75.0);
//! let hospital = Coordinates::new(41.0, -75.0);
//!
//! assert_eq!(round_km(distance_km(origin, hospital)), 111.19);
//! ```

pub mod booking;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod enrich;
pub mod error;
pub mod format;
pub mod geo;
pub mod search;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use coord::{Coordinates, Facility, OriginSource, RawFacility, ResultSet, SearchOrigin};
pub use error::{Error, PositionError, Result};
pub use search::{HttpLocator, Locator, Search, SearchRequest};
pub use state::{SearchState, Store};
