//! Nominatim reverse geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API to turn facility coordinates into addresses.
//! Nominatim requires an identifying User-Agent on every request.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{build_client, endpoint, AddressResolver};
use serde::Deserialize;
use tracing::debug;

/// Nominatim reverse geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim reverse response
///
/// Points with no address come back as `{"error": "Unable to geocode"}`
#[derive(Debug, Deserialize)]
struct NominatimReverse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl NominatimBackend {
    /// Create a backend from configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(&config.http)?,
            base_url: config.endpoints.reverse.clone(),
        })
    }

    fn reverse_url(&self, at: Coordinates) -> String {
        format!(
            "{}?lat={}&lon={}&format=json",
            endpoint(&self.base_url, "reverse"),
            at.lat,
            at.lng
        )
    }
}

impl AddressResolver for NominatimBackend {
    async fn reverse_geocode(&self, at: Coordinates) -> Result<Option<String>> {
        let url = self.reverse_url(at);

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Ok(None);
            }
            return Err(Error::Geo(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let result: NominatimReverse = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse Nominatim response: {}", e)))?;

        if let Some(reason) = &result.error {
            debug!(lat = at.lat, lng = at.lng, reason = %reason, "no address for point");
        }

        Ok(result.display_name.filter(|name| !name.trim().is_empty()))
    }
}
