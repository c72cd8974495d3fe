//! Coordinates and facility records
//!
//! This module handles:
//! - Geographic coordinates and search origins
//! - Raw and enriched hospital facilities
//! - Distance-sorted result sets

pub mod distance;

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.lat.is_finite() || self.lat < -90.0 || self.lat > 90.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !self.lng.is_finite() || self.lng < -180.0 || self.lng > 180.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Where a search origin came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginSource {
    /// Current position reported by the device provider
    Device,
    /// Forward-geocoded from free text
    AddressLookup,
}

impl std::fmt::Display for OriginSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device => write!(f, "device"),
            Self::AddressLookup => write!(f, "address_lookup"),
        }
    }
}

/// The position a search is centered on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOrigin {
    pub coordinate: Coordinates,
    pub source: OriginSource,
}

impl SearchOrigin {
    pub fn new(coordinate: Coordinates, source: OriginSource) -> Self {
        Self { coordinate, source }
    }
}

/// A facility as returned by the places lookup, before enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFacility {
    pub id: String,
    pub name: String,
    pub location: Coordinates,
}

impl RawFacility {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }
}

/// A facility with its distance from the origin and a resolved address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub location: Coordinates,

    /// Unrounded great-circle distance from the search origin
    pub distance_km: f64,

    /// Resolved address, or a placeholder when resolution failed
    pub address: String,
}

impl Facility {
    /// Attach distance and address to a raw facility
    pub fn enriched(raw: RawFacility, distance_km: f64, address: String) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            location: raw.location,
            distance_km,
            address,
        }
    }

    /// Distance rounded for display, e.g. "1.40"
    pub fn display_distance(&self) -> String {
        format!("{:.2}", distance::round_km(self.distance_km))
    }
}

/// Facilities for one search, ascending by distance from `origin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub origin: SearchOrigin,
    pub facilities: Vec<Facility>,

    /// When the set was built (RFC 3339)
    pub generated_at: String,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Facility> {
        self.facilities.iter()
    }

    /// Find a facility by its places id
    pub fn get(&self, id: &str) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.id == id)
    }
}
