//! Route summarization
//!
//! Turns a raw driving route into the labels a traveller reads: how far,
//! how long for the chosen bus type, and which towns the road passes.

use std::sync::Arc;

use domain::entities::RouteResult;
use domain::labels::{
    self, UNKNOWN_LOCALITY, average_speed_kmph, collapse_consecutive_duplicates, format_distance,
    format_duration, join_via,
};
use domain::value_objects::ServiceClass;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::ports::GeocodingPort;

/// Human-readable summary of a route for one bus type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// e.g. `"7 hr 42 min"`
    pub duration_label: String,
    /// e.g. `"462.3 km"`
    pub distance_label: String,
    /// Place names joined by arrows, absent when there are none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via_label: Option<String>,
    /// Place names in travel order, consecutive repeats removed
    pub via_places: Vec<String>,
    /// Driving duration after the service class adjustment
    pub adjusted_duration_minutes: f64,
    /// Absent when the duration is zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_speed_kmph: Option<f64>,
}

impl RouteSummary {
    /// One-line summary shown alongside the map
    pub fn info_line(&self) -> String {
        labels::info_line(
            &self.distance_label,
            &self.duration_label,
            self.via_label.as_deref(),
        )
    }

    /// Tooltip for the route polyline
    pub fn tooltip(&self) -> String {
        labels::route_tooltip(&self.distance_label, self.average_speed_kmph)
    }
}

/// Builds [`RouteSummary`] values, naming via points through the geocoder
#[derive(Clone)]
pub struct RouteSummarizer {
    geocoder: Arc<dyn GeocodingPort>,
}

impl std::fmt::Debug for RouteSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteSummarizer").finish_non_exhaustive()
    }
}

impl RouteSummarizer {
    pub fn new(geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self { geocoder }
    }

    /// Summarize `route` for the given bus type (`None` or `"All"` for no adjustment)
    #[instrument(skip(self, route), fields(points = route.geometry().len()))]
    pub async fn summarize(&self, route: &RouteResult, bus_type: Option<&str>) -> RouteSummary {
        let class = bus_type.map_or(ServiceClass::Standard, ServiceClass::from_bus_type);
        let adjusted = class.adjust_minutes(route.duration_minutes());

        let via_places = self.name_via_points(route).await;
        debug!(count = via_places.len(), "Named via points");

        RouteSummary {
            duration_label: format_duration(adjusted),
            distance_label: format_distance(route.distance_km()),
            via_label: join_via(&via_places),
            via_places,
            adjusted_duration_minutes: adjusted,
            average_speed_kmph: average_speed_kmph(route.distance_km(), adjusted),
        }
    }

    /// Reverse-geocode the interior via points in order
    async fn name_via_points(&self, route: &RouteResult) -> Vec<String> {
        let mut names = Vec::with_capacity(route.interior_via_coords().len());
        for location in route.interior_via_coords() {
            let name = match self.geocoder.reverse_geocode(location).await {
                Ok(name) => name,
                Err(e) => {
                    warn!(%location, error = %e, "Reverse geocoding failed");
                    UNKNOWN_LOCALITY.to_string()
                },
            };
            names.push(name);
        }
        collapse_consecutive_duplicates(names)
    }
}
