//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/hospital-locator/config.toml

pub mod defaults;

use crate::constants::api::{
    GEOAPIFY_URL, HOSPITAL_CATEGORY, IP_API_URL, NOMINATIM_URL, OPENCAGE_URL,
};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for CLI output
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Places search parameters
    #[serde(default)]
    pub search: SearchConfig,

    /// Device positioning settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Provider base URLs
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// API keys for various services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Default values for CLI output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Places search parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search radius around the origin in meters
    #[serde(default = "default_radius")]
    pub radius_meters: u32,

    /// Maximum number of facilities returned
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Places category to query
    #[serde(default = "default_category")]
    pub category: String,
}

/// Device positioning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Position provider: "ip", "fixed" or "none"
    #[serde(default = "default_position_provider")]
    pub provider: String,

    /// How long to wait for a position fix
    #[serde(default = "default_position_timeout")]
    pub timeout_ms: u64,

    /// Latitude reported by the "fixed" provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_lat: Option<f64>,

    /// Longitude reported by the "fixed" provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_lng: Option<f64>,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Provider base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Geoapify places
    #[serde(default = "default_places_url")]
    pub places: String,

    /// OpenCage forward geocoding
    #[serde(default = "default_geocode_url")]
    pub geocode: String,

    /// Nominatim reverse geocoding
    #[serde(default = "default_reverse_url")]
    pub reverse: String,

    /// IP geolocation
    #[serde(default = "default_ip_url")]
    pub ip: String,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Geoapify places API key
    #[serde(default)]
    pub geoapify: String,

    /// OpenCage geocoding API key
    #[serde(default)]
    pub opencage: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_radius() -> u32 {
    DEFAULT_RADIUS_METERS
}
fn default_limit() -> usize {
    DEFAULT_LIMIT
}
fn default_category() -> String {
    HOSPITAL_CATEGORY.to_string()
}
fn default_position_provider() -> String {
    DEFAULT_POSITION_PROVIDER.to_string()
}
fn default_position_timeout() -> u64 {
    DEFAULT_POSITION_TIMEOUT_MS
}
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_places_url() -> String {
    GEOAPIFY_URL.to_string()
}
fn default_geocode_url() -> String {
    OPENCAGE_URL.to_string()
}
fn default_reverse_url() -> String {
    NOMINATIM_URL.to_string()
}
fn default_ip_url() -> String {
    IP_API_URL.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_meters: default_radius(),
            limit: default_limit(),
            category: default_category(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: default_position_provider(),
            timeout_ms: default_position_timeout(),
            fixed_lat: None,
            fixed_lng: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            places: default_places_url(),
            geocode: default_geocode_url(),
            reverse: default_reverse_url(),
            ip: default_ip_url(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn parse_optional_f64(value: &str) -> Result<Option<f64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| Error::Config(format!("Invalid coordinate value: {}", value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, writing defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Apply API keys from the environment over the file values
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(GEOAPIFY_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_keys.geoapify = key;
        }
        if let Some(key) = lookup(OPENCAGE_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_keys.opencage = key;
        }
        self
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if the key is unknown
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["search", "radius_meters"] => Some(self.search.radius_meters.to_string()),
            ["search", "limit"] => Some(self.search.limit.to_string()),
            ["search", "category"] => Some(self.search.category.clone()),

            ["location", "provider"] => Some(self.location.provider.clone()),
            ["location", "timeout_ms"] => Some(self.location.timeout_ms.to_string()),
            ["location", "fixed_lat"] => Some(
                self.location.fixed_lat.map(|v| v.to_string()).unwrap_or_default(),
            ),
            ["location", "fixed_lng"] => Some(
                self.location.fixed_lng.map(|v| v.to_string()).unwrap_or_default(),
            ),

            ["http", "timeout_secs"] => Some(self.http.timeout_secs.to_string()),
            ["http", "user_agent"] => Some(self.http.user_agent.clone()),

            ["endpoints", "places"] => Some(self.endpoints.places.clone()),
            ["endpoints", "geocode"] => Some(self.endpoints.geocode.clone()),
            ["endpoints", "reverse"] => Some(self.endpoints.reverse.clone()),
            ["endpoints", "ip"] => Some(self.endpoints.ip.clone()),

            ["api_keys", "geoapify"] => Some(self.api_keys.geoapify.clone()),
            ["api_keys", "opencage"] => Some(self.api_keys.opencage.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["search", "radius_meters"] => {
                self.search.radius_meters = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid radius value: {}", value))
                })?;
            }
            ["search", "limit"] => {
                self.search.limit = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid limit value: {}", value))
                })?;
            }
            ["search", "category"] => {
                self.search.category = value.to_string();
            }

            ["location", "provider"] => {
                self.location.provider = value.to_string();
            }
            ["location", "timeout_ms"] => {
                self.location.timeout_ms = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }
            ["location", "fixed_lat"] => {
                self.location.fixed_lat = parse_optional_f64(value)?;
            }
            ["location", "fixed_lng"] => {
                self.location.fixed_lng = parse_optional_f64(value)?;
            }

            ["http", "timeout_secs"] => {
                self.http.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }
            ["http", "user_agent"] => {
                self.http.user_agent = value.to_string();
            }

            ["endpoints", "places"] => {
                self.endpoints.places = value.to_string();
            }
            ["endpoints", "geocode"] => {
                self.endpoints.geocode = value.to_string();
            }
            ["endpoints", "reverse"] => {
                self.endpoints.reverse = value.to_string();
            }
            ["endpoints", "ip"] => {
                self.endpoints.ip = value.to_string();
            }

            ["api_keys", "geoapify"] => {
                self.api_keys.geoapify = value.to_string();
            }
            ["api_keys", "opencage"] => {
                self.api_keys.opencage = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.format",
            "search.radius_meters",
            "search.limit",
            "search.category",
            "location.provider",
            "location.timeout_ms",
            "location.fixed_lat",
            "location.fixed_lng",
            "http.timeout_secs",
            "http.user_agent",
            "endpoints.places",
            "endpoints.geocode",
            "endpoints.reverse",
            "endpoints.ip",
            "api_keys.geoapify",
            "api_keys.opencage",
            "server.host",
            "server.port",
        ]
    }

    /// Position reported by the "fixed" provider, if both axes are set
    pub fn fixed_position(&self) -> Option<Coordinates> {
        match (self.location.fixed_lat, self.location.fixed_lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.search.radius_meters, 5000);
        assert_eq!(config.search.limit, 10);
        assert_eq!(config.search.category, "healthcare.hospital");
        assert_eq!(config.location.timeout_ms, 5000);
        assert_eq!(config.location.provider, "ip");
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("search.limit"), Some("10".to_string()));

        config.set("search.limit", "5").unwrap();
        assert_eq!(config.search.limit, 5);

        config.set("api_keys.geoapify", "abc").unwrap();
        assert_eq!(config.get("api_keys.geoapify"), Some("abc".to_string()));
    }

    #[test]
    fn test_fixed_position_keys() {
        let mut config = Config::default();
        assert_eq!(config.get("location.fixed_lat"), Some(String::new()));
        assert!(config.fixed_position().is_none());

        config.set("location.fixed_lat", "40.5").unwrap();
        assert!(config.fixed_position().is_none());

        config.set("location.fixed_lng", "-75.25").unwrap();
        assert_eq!(config.fixed_position(), Some(Coordinates::new(40.5, -75.25)));

        config.set("location.fixed_lat", "").unwrap();
        assert!(config.location.fixed_lat.is_none());
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("search.radius_meters", "not_a_number").is_err());
        assert!(config.set("location.fixed_lng", "east").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_overrides_from(|name| match name {
            GEOAPIFY_KEY_ENV => Some("geo-key".to_string()),
            OPENCAGE_KEY_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.api_keys.geoapify, "geo-key");
        // empty variables do not clobber the file value
        assert_eq!(config.api_keys.opencage, "");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.radius_meters = 2500;
        config.api_keys.opencage = "oc".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.search.radius_meters, 2500);
        assert_eq!(loaded.api_keys.opencage, "oc");
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.search.limit, 10);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[search]\nlimit = 3\n").unwrap();
        assert_eq!(loaded.search.limit, 3);
        assert_eq!(loaded.search.radius_meters, 5000);
        assert_eq!(loaded.endpoints.reverse, "https://nominatim.openstreetmap.org");
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[search]"));
        assert!(toml.contains("[location]"));
        assert!(toml.contains("[endpoints]"));
        assert!(toml.contains("[api_keys]"));
        assert!(!toml.contains("fixed_lat"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7878");
    }

    #[test]
    fn test_available_keys_are_gettable() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "key {} not readable", key);
        }
    }
}
