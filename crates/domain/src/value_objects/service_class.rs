//! Service class derived from the bus type

use serde::{Deserialize, Serialize};

/// How fast a bus type runs relative to the driving estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceClass {
    Express,
    Deluxe,
    #[default]
    Standard,
}

impl ServiceClass {
    /// Classify a bus type label, ignoring case.
    ///
    /// Only the exact labels `express` and `deluxe` get a faster class;
    /// everything else, including `All`, is standard.
    #[must_use]
    pub fn from_bus_type(bus_type: &str) -> Self {
        match bus_type.trim().to_lowercase().as_str() {
            "express" => Self::Express,
            "deluxe" => Self::Deluxe,
            _ => Self::Standard,
        }
    }

    /// Multiplier applied to the driving duration
    #[must_use]
    pub const fn duration_factor(self) -> f64 {
        match self {
            Self::Express => 0.9,
            Self::Deluxe => 0.85,
            Self::Standard => 1.0,
        }
    }

    /// Scale a driving duration in minutes
    #[must_use]
    pub fn adjust_minutes(self, minutes: f64) -> f64 {
        minutes * self.duration_factor()
    }
}
