//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default places search radius in meters
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// Default maximum number of facilities returned
pub const DEFAULT_LIMIT: usize = 10;

/// Default device position provider
pub const DEFAULT_POSITION_PROVIDER: &str = "ip";

/// Default wait for a position fix, in milliseconds
pub const DEFAULT_POSITION_TIMEOUT_MS: u64 = 5000;

/// Default timeout for provider HTTP calls, in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// User-Agent sent to providers (Nominatim rejects anonymous clients)
pub const DEFAULT_USER_AGENT: &str = "hospital-locator/0.1.0";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Environment variable overriding `api_keys.geoapify`
pub const GEOAPIFY_KEY_ENV: &str = "GEOAPIFY_API_KEY";

/// Environment variable overriding `api_keys.opencage`
pub const OPENCAGE_KEY_ENV: &str = "OPENCAGE_API_KEY";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "hospital-locator";
