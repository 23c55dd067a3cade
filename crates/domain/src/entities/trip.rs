//! A single scheduled bus service

use serde::{Deserialize, Serialize};

/// One row of the bus schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub origin: String,
    pub destination: String,
    pub bus_type: String,
    pub corporation: String,
    pub trip_name: String,
    /// Departure time exactly as the schedule spells it
    pub departure_time: String,
}

impl Trip {
    /// Create a trip from its six fields
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        bus_type: impl Into<String>,
        corporation: impl Into<String>,
        trip_name: impl Into<String>,
        departure_time: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            bus_type: bus_type.into(),
            corporation: corporation.into(),
            trip_name: trip_name.into(),
            departure_time: departure_time.into(),
        }
    }

    /// Whether this trip runs between the given places
    pub fn connects(&self, origin: &str, destination: &str) -> bool {
        self.origin == origin && self.destination == destination
    }
}
