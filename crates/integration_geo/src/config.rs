//! Geocoding and routing service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Timeout for forward lookups in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Timeout for reverse lookups in seconds
    #[serde(default = "default_reverse_timeout_secs")]
    pub reverse_timeout_secs: u64,

    /// Pause before the single retry of a failed forward lookup
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Minimum spacing between requests (0 disables pacing)
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Country code filter (e.g., "in"), empty for no filter
    #[serde(default)]
    pub country_filter: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    100
}

const fn default_reverse_timeout_secs() -> u64 {
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

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            reverse_timeout_secs: default_reverse_timeout_secs(),
            retry_delay_ms: default_retry_delay_ms(),
            min_interval_ms: default_min_interval_ms(),
            user_agent: default_user_agent(),
            country_filter: String::new(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            reverse_timeout_secs: 2,
            retry_delay_ms: 10,
            min_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("geocoding base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 || self.reverse_timeout_secs == 0 {
            return Err("geocoding timeouts must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("geocoding user_agent must not be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration for the OpenRouteService directions API
#[derive(Clone, Serialize, Deserialize)]
pub struct OrsConfig {
    /// Base URL for the OpenRouteService API
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,

    /// API key sent in the `Authorization` header
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_routing_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OrsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_routing_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

const fn default_routing_timeout_secs() -> u64 {
    120
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            api_key: String::new(),
            timeout_secs: default_routing_timeout_secs(),
        }
    }
}

impl OrsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("routing base_url must not be empty".to_string());
        }
        if self.api_key.trim().is_empty() {
            return Err("routing api_key must be set".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("routing timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
