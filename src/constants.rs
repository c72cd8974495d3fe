//! Centralized constants for the hospital-locator crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
}

/// External API endpoints
pub mod api {
    /// Geoapify places API
    pub const GEOAPIFY_URL: &str = "https://api.geoapify.com";

    /// OpenCage forward geocoding API
    pub const OPENCAGE_URL: &str = "https://api.opencagedata.com";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// Places category searched for
    pub const HOSPITAL_CATEGORY: &str = "healthcare.hospital";
}

/// User-facing status messages
pub mod messages {
    pub const ERROR_FETCHING_HOSPITALS: &str = "Error fetching hospitals";
    pub const ERROR_FETCHING_ADDRESS: &str = "Error fetching address";
    pub const ERROR_FETCHING_LOCATION: &str = "Error fetching location";
    pub const LOCATION_NOT_FOUND: &str = "Location not found";
    pub const ADDRESS_NOT_AVAILABLE: &str = "Address not available";
    pub const LOCATION_UNAVAILABLE: &str =
        "Unable to fetch your location. Please allow location access.";
    pub const LOCATION_NOT_SUPPORTED: &str = "Geolocation is not supported by this platform.";
    pub const UNNAMED_FACILITY: &str = "Unnamed hospital";
}
