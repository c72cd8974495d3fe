//! OpenCage forward geocoding backend
//!
//! Turns a free-text address into coordinates. Only the first ranked result
//! is used; a result without usable geometry counts as "not found".

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{build_client, endpoint, GeoLocation, LocationResolver};
use serde::Deserialize;
use tracing::{debug, warn};

/// OpenCage geocoding backend
#[derive(Debug, Clone)]
pub struct OpenCageBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
struct OpenCageResult {
    #[serde(default)]
    geometry: Option<OpenCageGeometry>,
    #[serde(default)]
    formatted: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenCageGeometry {
    lat: f64,
    lng: f64,
}

impl OpenCageBackend {
    /// Create a backend from configuration
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_keys.opencage.is_empty() {
            warn!("no OpenCage API key configured; address searches will be rejected");
        }
        Ok(Self {
            client: build_client(&config.http)?,
            base_url: config.endpoints.geocode.clone(),
            api_key: config.api_keys.opencage.clone(),
        })
    }

    fn geocode_url(&self, query: &str) -> String {
        format!(
            "{}?q={}&key={}",
            endpoint(&self.base_url, "geocode/v1/json"),
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        )
    }

    /// Pick the first ranked result, if it carries valid geometry
    fn first_location(response: OpenCageResponse, query: &str) -> Option<GeoLocation> {
        let result = response.results.into_iter().next()?;
        let geometry = result.geometry?;

        if !Coordinates::new(geometry.lat, geometry.lng).is_valid() {
            debug!(query, lat = geometry.lat, lng = geometry.lng, "discarding invalid geometry");
            return None;
        }

        Some(GeoLocation {
            lat: geometry.lat,
            lng: geometry.lng,
            display_name: result.formatted.unwrap_or_else(|| query.to_string()),
        })
    }
}

impl LocationResolver for OpenCageBackend {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        let url = self.geocode_url(query);

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("OpenCage request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "OpenCage returned status: {}",
                response.status()
            )));
        }

        let body: OpenCageResponse = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse OpenCage response: {}", e)))?;

        Ok(Self::first_location(body, query))
    }
}
