//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `integrations`: schedule file, geocoding and routing services
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `TAMILVANDI_`-prefixed environment variables with `__` between
//! nested keys (e.g. `TAMILVANDI_ROUTING__API_KEY`).

mod integrations;
mod server;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use integrations::{GeocodingAppConfig, RoutingAppConfig, ScheduleConfig};
pub use server::ServerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Conventional environment variable holding an OpenRouteService key
pub const ORS_API_KEY_ENV: &str = "ORS_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Bus schedule source
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Nominatim geocoding
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// OpenRouteService routing
    #[serde(default)]
    pub routing: RoutingAppConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from environment and an optional file
    ///
    /// `file` is passed to [`config::File::with_name`], so the extension
    /// may be omitted.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., TAMILVANDI_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("TAMILVANDI")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.resolve_api_key_from_env();
        Ok(config)
    }

    /// Fill in the routing key from `ORS_API_KEY` when none is configured
    ///
    /// Existing config values are never overridden.
    pub fn resolve_api_key_from_env(&mut self) {
        if self.routing.api_key_str().is_some() {
            return;
        }
        if let Ok(val) = std::env::var(ORS_API_KEY_ENV) {
            if !val.trim().is_empty() {
                self.routing.api_key = Some(SecretString::from(val));
                debug!("Loaded routing.api_key from {ORS_API_KEY_ENV}");
            }
        }
    }

    /// Check for problems that must stop the server from starting
    ///
    /// # Errors
    ///
    /// Returns every problem found, one message each.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if let Err(e) = self.server.validate() {
            problems.push(e);
        }
        if self.schedule.path.as_os_str().is_empty() {
            problems.push("schedule.path must not be empty".to_string());
        }
        if let Err(e) = self.geocoding.to_nominatim_config().validate() {
            problems.push(e);
        }
        if self.routing.api_key_str().is_none() {
            problems.push(format!(
                "routing.api_key is not set (use TAMILVANDI_ROUTING__API_KEY or {ORS_API_KEY_ENV})"
            ));
        } else if let Err(e) = self.routing.to_ors_config().validate() {
            problems.push(e);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
