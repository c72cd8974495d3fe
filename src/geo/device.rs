//! Device positioning
//!
//! The "device" position of a CLI or server process. Every call takes a fresh
//! fix: nothing is cached between searches, and a fix that does not arrive
//! within the configured wait is a timeout.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, PositionError, Result};
use crate::geo::{build_client, PositionProvider};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// IP-based position provider using ip-api.com
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

impl IpApiResponse {
    fn into_position(self) -> std::result::Result<Coordinates, PositionError> {
        if self.status != "success" {
            let reason = self.message.unwrap_or_else(|| self.status.clone());
            return Err(PositionError::Unavailable(reason));
        }

        match (self.lat, self.lon) {
            (Some(lat), Some(lng)) if Coordinates::new(lat, lng).is_valid() => {
                Ok(Coordinates::new(lat, lng))
            }
            _ => Err(PositionError::Unavailable(
                "no coordinates in response".to_string(),
            )),
        }
    }
}

impl IpLocator {
    /// Create an IP locator from configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(&config.http)?,
            url: config.endpoints.ip.clone(),
            timeout: Duration::from_millis(config.location.timeout_ms),
        })
    }

    async fn fetch_position(&self) -> std::result::Result<Coordinates, PositionError> {
        let response = self.client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PositionError::Unavailable(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PositionError::Unavailable(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response.json().await.map_err(|e| {
            PositionError::Unavailable(format!("Failed to parse IP location response: {}", e))
        })?;

        data.into_position()
    }
}

impl PositionProvider for IpLocator {
    async fn current_position(&self) -> std::result::Result<Coordinates, PositionError> {
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        let position = tokio::time::timeout(self.timeout, self.fetch_position())
            .await
            .map_err(|_| PositionError::Timeout(timeout_ms))??;

        debug!(lat = position.lat, lng = position.lng, "IP position fix");
        Ok(position)
    }
}

/// Device position selected by configuration
#[derive(Debug, Clone)]
pub enum DevicePosition {
    /// Geolocate this machine by its public IP
    Ip(IpLocator),
    /// A position supplied by the user
    Fixed(Coordinates),
    /// No positioning capability
    Unsupported,
    /// A fixed position was selected but not usable; fails on use only
    Misconfigured(String),
}

impl DevicePosition {
    /// Build the provider named by `location.provider`
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = match config.location.provider.to_lowercase().as_str() {
            "ip" => Self::Ip(IpLocator::new(config)?),
            "fixed" => match config.fixed_position() {
                Some(position) if position.is_valid() => Self::Fixed(position),
                Some(position) => {
                    let reason = format!(
                        "location.fixed_lat/fixed_lng out of range: ({}, {})",
                        position.lat, position.lng
                    );
                    warn!(%reason, "fixed device position unusable");
                    Self::Misconfigured(reason)
                }
                None => {
                    let reason = "location.provider is \"fixed\" but location.fixed_lat/fixed_lng are not set"
                        .to_string();
                    warn!(%reason, "fixed device position unusable");
                    Self::Misconfigured(reason)
                }
            },
            "none" => Self::Unsupported,
            other => {
                return Err(Error::Config(format!("Unknown position provider: {}", other)));
            }
        };

        info!(provider = provider.name(), "device position provider ready");
        Ok(provider)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ip(_) => "ip",
            Self::Fixed(_) => "fixed",
            Self::Unsupported => "none",
            Self::Misconfigured(_) => "fixed",
        }
    }
}

impl PositionProvider for DevicePosition {
    async fn current_position(&self) -> std::result::Result<Coordinates, PositionError> {
        match self {
            Self::Ip(locator) => locator.current_position().await,
            Self::Fixed(position) => Ok(*position),
            Self::Unsupported => Err(PositionError::NotSupported),
            Self::Misconfigured(reason) => Err(PositionError::Unavailable(reason.clone())),
        }
    }
}
