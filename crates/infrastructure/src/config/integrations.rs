//! Data source and upstream service configurations: schedule, geocoding, routing.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Schedule
// ==============================

/// Where the bus schedule is read from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Path to the schedule CSV file
    #[serde(default = "default_schedule_path")]
    pub path: PathBuf,
}

fn default_schedule_path() -> PathBuf {
    PathBuf::from("data/bus_schedule.csv")
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            path: default_schedule_path(),
        }
    }
}

// ==============================
// Geocoding (Nominatim)
// ==============================

/// Nominatim geocoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Forward lookup timeout in seconds (default: 100)
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,

    /// Reverse lookup timeout in seconds (default: 10)
    #[serde(default = "default_reverse_timeout")]
    pub reverse_timeout_secs: u64,

    /// Pause before retrying a failed forward lookup (default: 1000)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Minimum spacing between requests in milliseconds (default: 1100, 0 = off)
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// User agent sent to Nominatim
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Country code filter (e.g., "in"), empty for none
    #[serde(default)]
    pub country_filter: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout() -> u64 {
    100
}

const fn default_reverse_timeout() -> u64 {
    10
}

const fn default_retry_delay_ms() -> u64 {
    1000
}

const fn default_min_interval_ms() -> u64 {
    1100
}

fn default_user_agent() -> String {
    "tamilvandi-app".to_string()
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout(),
            reverse_timeout_secs: default_reverse_timeout(),
            retry_delay_ms: default_retry_delay_ms(),
            min_interval_ms: default_min_interval_ms(),
            user_agent: default_user_agent(),
            country_filter: String::new(),
        }
    }
}

impl GeocodingAppConfig {
    /// Convert to `integration_geo::NominatimConfig`
    #[must_use]
    pub fn to_nominatim_config(&self) -> integration_geo::NominatimConfig {
        integration_geo::NominatimConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            reverse_timeout_secs: self.reverse_timeout_secs,
            retry_delay_ms: self.retry_delay_ms,
            min_interval_ms: self.min_interval_ms,
            user_agent: self.user_agent.clone(),
            country_filter: self.country_filter.clone(),
        }
    }
}

// ==============================
// Routing (OpenRouteService)
// ==============================

/// OpenRouteService configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct RoutingAppConfig {
    /// Base URL for the OpenRouteService API
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 120)
    #[serde(default = "default_routing_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RoutingAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_routing_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

const fn default_routing_timeout() -> u64 {
    120
}

impl Default for RoutingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            api_key: None,
            timeout_secs: default_routing_timeout(),
        }
    }
}

impl RoutingAppConfig {
    /// The API key, if one is configured and not blank
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
    }

    /// Convert to `integration_geo::OrsConfig`
    #[must_use]
    pub fn to_ors_config(&self) -> integration_geo::OrsConfig {
        integration_geo::OrsConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key_str().unwrap_or_default().to_string(),
            timeout_secs: self.timeout_secs,
        }
    }
}
