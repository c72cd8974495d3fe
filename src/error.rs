//! Error types for hospital-locator

use crate::constants::messages;
use thiserror::Error;

/// Main error type for hospital-locator operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Geo error: {0}")]
    Geo(String),

    /// A search finished with a user-facing failure message
    #[error("{0}")]
    Search(String),
}

/// Result type alias for hospital-locator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of the device positioning channel
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    /// The provider answered but refused or could not produce a fix
    #[error("position unavailable: {0}")]
    Unavailable(String),

    /// No fix arrived within the configured wait
    #[error("timed out after {0} ms waiting for a position fix")]
    Timeout(u64),

    /// This platform has no positioning capability configured
    #[error("positioning is not supported")]
    NotSupported,
}

impl PositionError {
    /// Message shown to the user in the location-error channel
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unavailable(_) | Self::Timeout(_) => messages::LOCATION_UNAVAILABLE,
            Self::NotSupported => messages::LOCATION_NOT_SUPPORTED,
        }
    }
}
