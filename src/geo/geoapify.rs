//! Geoapify places backend
//!
//! Finds hospitals within a circle around the origin. The response is a
//! GeoJSON feature collection; each feature's properties carry the facility
//! name, id and its own coordinates.

use crate::config::{Config, SearchConfig};
use crate::constants::messages::UNNAMED_FACILITY;
use crate::coord::{Coordinates, RawFacility};
use crate::error::{Error, Result};
use crate::geo::{build_client, endpoint, HospitalFinder};
use serde::Deserialize;
use tracing::{debug, warn};

/// Geoapify places backend
#[derive(Debug, Clone)]
pub struct GeoapifyBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    search: SearchConfig,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: PlaceProperties,
}

#[derive(Debug, Deserialize)]
struct PlaceProperties {
    lat: f64,
    lon: f64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    place_id: Option<String>,
}

impl PlaceProperties {
    fn into_raw(self) -> RawFacility {
        let location = Coordinates::new(self.lat, self.lon);
        let id = self
            .id
            .or(self.place_id)
            .unwrap_or_else(|| format!("{},{}", self.lat, self.lon));
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNNAMED_FACILITY.to_string());
        RawFacility::new(id, name, location)
    }
}

impl GeoapifyBackend {
    /// Create a backend from configuration
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_keys.geoapify.is_empty() {
            warn!("no Geoapify API key configured; hospital lookups will be rejected");
        }
        Ok(Self {
            client: build_client(&config.http)?,
            base_url: config.endpoints.places.clone(),
            api_key: config.api_keys.geoapify.clone(),
            search: config.search.clone(),
        })
    }

    fn places_url(&self, origin: Coordinates) -> String {
        format!(
            "{}?categories={}&filter=circle:{},{},{}&limit={}&apiKey={}",
            endpoint(&self.base_url, "v2/places"),
            urlencoding::encode(&self.search.category),
            origin.lng,
            origin.lat,
            self.search.radius_meters,
            self.search.limit,
            urlencoding::encode(&self.api_key)
        )
    }

    fn parse_facilities(body: FeatureCollection, limit: usize) -> Vec<RawFacility> {
        body.features
            .into_iter()
            .take(limit)
            .map(|feature| feature.properties.into_raw())
            .collect()
    }
}

impl HospitalFinder for GeoapifyBackend {
    async fn find_nearby(&self, origin: Coordinates) -> Result<Vec<RawFacility>> {
        let url = self.places_url(origin);

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("Geoapify request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "Geoapify returned status: {}",
                response.status()
            )));
        }

        let body: FeatureCollection = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse Geoapify response: {}", e)))?;

        let facilities = Self::parse_facilities(body, self.search.limit);
        debug!(count = facilities.len(), "places lookup returned facilities");
        Ok(facilities)
    }
}
