//! Service configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file. Every section has defaults so a missing or minimal file works.

use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Root configuration for the dashboard service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the clock lives: timezone and coordinates.
    pub location: LocationConfig,

    /// Sunrise/sunset API settings.
    pub almanac: AlmanacConfig,

    /// Temperature/humidity sensor settings.
    pub sensor: SensorConfig,

    /// Static asset paths.
    pub assets: AssetsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Physical location of the clock.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocationConfig {
    /// IANA timezone name used for every displayed time and date.
    pub timezone: String,

    /// Latitude in decimal degrees, for the almanac query.
    pub latitude: f64,

    /// Longitude in decimal degrees, for the almanac query.
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            timezone: "Europe/Paris".to_string(),
            latitude: 48.744760,
            longitude: -0.962368,
        }
    }
}

impl LocationConfig {
    /// Resolve the configured timezone, falling back to UTC when the name
    /// is unknown. Validation rejects unknown names before startup, so the
    /// fallback only matters for hand-built configs.
    pub fn resolve_timezone(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::error!(timezone = %self.timezone, "unknown timezone, falling back to UTC");
            Tz::UTC
        })
    }
}

/// Sunrise/sunset API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlmanacConfig {
    /// Base URL of the sunrise/sunset API.
    pub base_url: String,

    /// How often to poll. The poller caches per calendar day, so most
    /// ticks are no-ops.
    pub refresh_interval_secs: u64,

    /// Timeout for one API request.
    pub request_timeout_secs: u64,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.sunrisesunset.io".to_string(),
            refresh_interval_secs: 60,
            request_timeout_secs: 30,
        }
    }
}

/// eWeLink temperature/humidity sensor settings.
///
/// Credentials may also arrive via the `EWELINK_APP_ID`, `EWELINK_DEVICE_ID`
/// and `EWELINK_TOKEN` environment variables, which override the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Enable the sensor poller. When false the sensor snippet endpoints
    /// report an absent reading.
    pub enabled: bool,

    /// Base URL of the eWeLink API.
    pub api_base_url: String,

    /// eWeLink application id.
    pub app_id: String,

    /// Device id of the temperature sensor.
    pub device_id: String,

    /// Bearer token for the device query.
    pub token: String,

    /// How often to poll the sensor.
    pub refresh_interval_secs: u64,

    /// Timeout for one API request.
    pub request_timeout_secs: u64,

    /// Readings older than this are displayed with the `error` class.
    pub stale_after_secs: u64,

    /// Battery percentage below which readings carry the `battery` class.
    pub low_battery_threshold: i64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base_url: "https://eu-api.coolkit.cc:8080".to_string(),
            app_id: String::new(),
            device_id: String::new(),
            token: String::new(),
            refresh_interval_secs: 300,
            request_timeout_secs: 30,
            stale_after_secs: 600,
            low_battery_threshold: 20,
        }
    }
}

/// Static asset paths.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding `clock.html` and `dist.css`.
    pub static_dir: PathBuf,

    /// Path to the utility-CSS build configuration document.
    pub tailwind_config: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            tailwind_config: PathBuf::from("static/tailwind.config.json"),
        }
    }
}
