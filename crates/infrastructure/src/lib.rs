//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns the process
//! concerns around them: configuration, the schedule loader and logging.

pub mod adapters;
pub mod config;
pub mod schedule;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, GeocodingAppConfig, ORS_API_KEY_ENV, RoutingAppConfig, ScheduleConfig,
    ServerConfig,
};
pub use schedule::{ScheduleLoadError, load_trips, read_trips};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
