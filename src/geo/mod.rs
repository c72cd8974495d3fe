//! Provider integrations
//!
//! Forward geocoding, reverse geocoding, places lookup and device positioning,
//! each behind a narrow trait so searches can run against deterministic fakes.

pub mod device;
pub mod geoapify;
pub mod nominatim;
pub mod opencage;

#[cfg(test)]
pub(crate) mod fake;

use crate::config::HttpConfig;
use crate::coord::{Coordinates, RawFacility};
use crate::error::{PositionError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// A geocoded location result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

impl GeoLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Forward geocoding: free text to a position
pub trait LocationResolver: Send + Sync {
    /// Geocode a location string to coordinates
    ///
    /// Returns the best match for the query, or None if not found
    fn geocode(&self, query: &str) -> impl Future<Output = Result<Option<GeoLocation>>> + Send;
}

/// Reverse geocoding: a position to a human-readable address
pub trait AddressResolver: Send + Sync {
    /// Returns None when the provider has no address for the point
    fn reverse_geocode(&self, at: Coordinates) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Places lookup for hospitals around a point
pub trait HospitalFinder: Send + Sync {
    /// All-or-nothing: any failure fails the whole lookup
    fn find_nearby(&self, origin: Coordinates) -> impl Future<Output = Result<Vec<RawFacility>>> + Send;
}

/// The device's own position
pub trait PositionProvider: Send + Sync {
    /// Take a fresh position fix
    fn current_position(
        &self,
    ) -> impl Future<Output = std::result::Result<Coordinates, PositionError>> + Send;
}

/// Build the shared HTTP client settings used by every provider
pub(crate) fn build_client(http: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(http.user_agent.as_str())
        .timeout(Duration::from_secs(http.timeout_secs))
        .build()?;
    Ok(client)
}

/// Join a configured base URL and a path without doubling slashes
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
