//! The static bus schedule
//!
//! Loaded once at startup and read-only afterwards. The origin and
//! destination vocabularies are fixed at construction time.

use std::collections::BTreeSet;

use super::trip::Trip;

/// Bus type filter value meaning "no filter"
pub const ALL_TYPES: &str = "All";

/// In-memory trip table with precomputed selector vocabularies
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    trips: Vec<Trip>,
    origins: BTreeSet<String>,
    destinations: BTreeSet<String>,
    types: BTreeSet<String>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl Schedule {
    /// Build a schedule from its trips
    pub fn new(trips: Vec<Trip>) -> Self {
        let origins = trips.iter().filter_map(|t| non_empty(&t.origin)).collect();
        let destinations = trips
            .iter()
            .filter_map(|t| non_empty(&t.destination))
            .collect();
        let types = trips.iter().filter_map(|t| non_empty(&t.bus_type)).collect();

        Self {
            trips,
            origins,
            destinations,
            types,
        }
    }

    /// All trips in load order
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Sorted distinct non-empty origins
    pub fn list_origins(&self) -> Vec<String> {
        self.origins.iter().cloned().collect()
    }

    /// Sorted distinct non-empty destinations
    pub fn list_destinations(&self) -> Vec<String> {
        self.destinations.iter().cloned().collect()
    }

    /// Sorted distinct non-empty bus types
    pub fn list_types(&self) -> Vec<String> {
        self.types.iter().cloned().collect()
    }

    pub fn contains_origin(&self, origin: &str) -> bool {
        self.origins.contains(origin)
    }

    pub fn contains_destination(&self, destination: &str) -> bool {
        self.destinations.contains(destination)
    }

    /// Trips matching origin and destination exactly.
    ///
    /// A `bus_type` of `None` or `"All"` does not filter; any other value
    /// must match the trip's type exactly. An empty result is not an error.
    pub fn search(&self, origin: &str, destination: &str, bus_type: Option<&str>) -> Vec<Trip> {
        let type_filter = bus_type.filter(|t| *t != ALL_TYPES);

        self.trips
            .iter()
            .filter(|t| t.connects(origin, destination))
            .filter(|t| type_filter.is_none_or(|wanted| t.bus_type == wanted))
            .cloned()
            .collect()
    }
}
