//! Output formatters
//!
//! Provides trait-based output formatting for search results. Distances are
//! rounded to two decimals here, at the presentation boundary.

pub mod gpx;
pub mod json;
pub mod text;

use crate::coord::distance::round_km;
use crate::coord::{Facility, OriginSource, ResultSet};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a search's results
    fn format(&self, results: &ResultSet) -> Result<String>;
}

/// A facility as presented to users and API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityView {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Rounded to two decimals
    pub distance_km: f64,
    pub address: String,
}

impl From<&Facility> for FacilityView {
    fn from(facility: &Facility) -> Self {
        Self {
            id: facility.id.clone(),
            name: facility.name.clone(),
            lat: facility.location.lat,
            lng: facility.location.lng,
            distance_km: round_km(facility.distance_km),
            address: facility.address.clone(),
        }
    }
}

/// A result set as presented to users and API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSetView {
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub source: OriginSource,
    pub generated_at: String,
    pub count: usize,
    pub facilities: Vec<FacilityView>,
}

impl From<&ResultSet> for ResultSetView {
    fn from(results: &ResultSet) -> Self {
        Self {
            origin_lat: results.origin.coordinate.lat,
            origin_lng: results.origin.coordinate.lng,
            source: results.origin.source,
            generated_at: results.generated_at.clone(),
            count: results.len(),
            facilities: results.iter().map(FacilityView::from).collect(),
        }
    }
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        Box::new(json::JsonFormatter) as Box<dyn OutputFormatter>,
        Box::new(text::TextFormatter),
        Box::new(gpx::GpxFormatter),
    ]
    .iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}

#[cfg(test)]
pub(crate) fn sample_results() -> ResultSet {
    use crate::coord::{Coordinates, RawFacility, SearchOrigin};

    ResultSet {
        origin: SearchOrigin::new(Coordinates::new(40.0, -75.0), OriginSource::AddressLookup),
        facilities: vec![
            Facility::enriched(
                RawFacility::new("near", "Near Clinic", Coordinates::new(40.01, -75.01)),
                1.400675729313813,
                "Error fetching address".to_string(),
            ),
            Facility::enriched(
                RawFacility::new("far", "Far & Wide General", Coordinates::new(41.0, -75.0)),
                111.19492664455873,
                "1 Far Rd".to_string(),
            ),
        ],
        generated_at: "2024-01-02T03:04:05+00:00".to_string(),
    }
}
