//! Bus finder use case
//!
//! Filters the schedule for a selection and, when asked, assembles the map
//! view for the route between the selected cities.

use std::sync::Arc;

use domain::entities::{ALL_TYPES, RouteResult, Schedule, Trip};
use domain::errors::DomainError;
use domain::labels::format_distance;
use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, RoutingPort};
use crate::services::route_summarizer::{RouteSummarizer, RouteSummary};

/// Warning shown when either city cannot be placed on the map
pub const LOCATIONS_NOT_FOUND: &str = "📍 Could not find map locations for the selected cities. Try using full names like 'Tiruchirappalli' instead of 'Trichy'.";

/// Warning shown when the cities were found but no road connects them
pub const NO_ROUTE_FOUND: &str = "No route found between the selected cities.";

/// Message shown when the search matched nothing
pub const NO_MATCHING_BUSES: &str = "No matching buses found.";

/// Initial zoom level of the map view
pub const MAP_ZOOM: u8 = 8;

fn default_bus_type() -> String {
    ALL_TYPES.to_string()
}

/// What the user picked in the three selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSelection {
    pub origin: String,
    pub destination: String,
    #[serde(default = "default_bus_type")]
    pub bus_type: String,
}

impl SearchSelection {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        bus_type: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            bus_type: bus_type.into(),
        }
    }

    /// The type filter to apply, `None` for "All"
    pub fn type_filter(&self) -> Option<&str> {
        Some(self.bus_type.as_str()).filter(|t| *t != ALL_TYPES)
    }
}

/// Values offered by the three selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    /// Starts with `"All"`
    pub bus_types: Vec<String>,
}

/// Result of a schedule search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub selection: SearchSelection,
    pub trips: Vec<Trip>,
    /// Road distance between the cities, when it could be looked up
    pub distance_km: Option<f64>,
    pub message: String,
}

impl SearchOutcome {
    pub fn found_trips(&self) -> bool {
        !self.trips.is_empty()
    }

    pub fn distance_label(&self) -> Option<String> {
        self.distance_km.map(format_distance)
    }
}

/// A marker pinned on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub tooltip: String,
    pub location: GeoLocation,
    pub color: String,
    pub icon: String,
}

impl MapMarker {
    fn new(tooltip: &str, location: GeoLocation, color: &str, icon: &str) -> Self {
        Self {
            tooltip: tooltip.to_string(),
            location,
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Everything needed to draw the route map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: GeoLocation,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
    /// Route geometry in travel order
    pub polyline: Vec<GeoLocation>,
    pub polyline_color: String,
    pub polyline_weight: u8,
    pub polyline_tooltip: String,
    pub summary: RouteSummary,
    pub info: String,
}

/// Result of a map request
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    /// The map can be drawn
    Ready(Box<MapView>),
    /// One of the cities could not be geocoded; no route was fetched
    LocationsNotFound,
    /// Both cities were found but the router had no route
    NoRoute,
}

impl MapOutcome {
    /// User-facing warning for the non-ready outcomes
    pub const fn warning(&self) -> Option<&'static str> {
        match self {
            Self::Ready(_) => None,
            Self::LocationsNotFound => Some(LOCATIONS_NOT_FOUND),
            Self::NoRoute => Some(NO_ROUTE_FOUND),
        }
    }

    pub fn view(&self) -> Option<&MapView> {
        match self {
            Self::Ready(view) => Some(view.as_ref()),
            _ => None,
        }
    }
}

/// The bus finder use case
#[derive(Clone)]
pub struct BusFinderService {
    schedule: Arc<Schedule>,
    geocoder: Arc<dyn GeocodingPort>,
    router: Arc<dyn RoutingPort>,
    summarizer: RouteSummarizer,
}

impl std::fmt::Debug for BusFinderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusFinderService")
            .field("trips", &self.schedule.len())
            .finish_non_exhaustive()
    }
}

impl BusFinderService {
    pub fn new(
        schedule: Arc<Schedule>,
        geocoder: Arc<dyn GeocodingPort>,
        router: Arc<dyn RoutingPort>,
    ) -> Self {
        let summarizer = RouteSummarizer::new(Arc::clone(&geocoder));
        Self {
            schedule,
            geocoder,
            router,
            summarizer,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Selector values: origins, destinations and `"All"` plus the bus types
    pub fn filters(&self) -> Filters {
        let mut bus_types = vec![ALL_TYPES.to_string()];
        bus_types.extend(
            self.schedule
                .list_types()
                .into_iter()
                .filter(|t| t != ALL_TYPES),
        );

        Filters {
            origins: self.schedule.list_origins(),
            destinations: self.schedule.list_destinations(),
            bus_types,
        }
    }

    /// Reject selections outside the schedule's vocabulary
    pub fn validate(&self, selection: &SearchSelection) -> Result<(), ApplicationError> {
        if !self.schedule.contains_origin(&selection.origin) {
            return Err(DomainError::unknown_origin(&selection.origin).into());
        }
        if !self.schedule.contains_destination(&selection.destination) {
            return Err(DomainError::unknown_destination(&selection.destination).into());
        }
        Ok(())
    }

    /// Search the schedule and look up the road distance for the result cards
    #[instrument(skip(self), fields(origin = %selection.origin, destination = %selection.destination, bus_type = %selection.bus_type))]
    pub async fn search(
        &self,
        selection: &SearchSelection,
    ) -> Result<SearchOutcome, ApplicationError> {
        self.validate(selection)?;

        let trips = self.schedule.search(
            &selection.origin,
            &selection.destination,
            selection.type_filter(),
        );
        info!(count = trips.len(), "Schedule searched");

        let distance_km = self
            .route_between(selection)
            .await
            .map(|route| route.distance_km());

        let message = if trips.is_empty() {
            NO_MATCHING_BUSES.to_string()
        } else {
            format!(
                "✅ {} buses found from {} to {}",
                trips.len(),
                selection.origin,
                selection.destination
            )
        };

        Ok(SearchOutcome {
            selection: selection.clone(),
            trips,
            distance_km,
            message,
        })
    }

    /// Assemble the route map for a selection
    #[instrument(skip(self), fields(origin = %selection.origin, destination = %selection.destination))]
    pub async fn map_view(&self, selection: &SearchSelection) -> Result<MapOutcome, ApplicationError> {
        self.validate(selection)?;

        let Some((from, to)) = self.locate_pair(selection).await else {
            return Ok(MapOutcome::LocationsNotFound);
        };

        let route = match self.router.route(&from, &to).await {
            Ok(route) => route,
            Err(e) => {
                warn!(error = %e, "No route for map view");
                return Ok(MapOutcome::NoRoute);
            },
        };

        let summary = self
            .summarizer
            .summarize(&route, selection.type_filter())
            .await;

        Ok(MapOutcome::Ready(Box::new(build_map_view(from, to, &route, summary))))
    }

    /// Geocode both cities, stopping at the first one that cannot be placed
    async fn locate_pair(&self, selection: &SearchSelection) -> Option<(GeoLocation, GeoLocation)> {
        let from = self.locate(&selection.origin).await?;
        let to = self.locate(&selection.destination).await?;
        Some((from, to))
    }

    async fn locate(&self, place: &str) -> Option<GeoLocation> {
        match self.geocoder.geocode(place).await {
            Ok(location) => Some(location),
            Err(e) => {
                warn!(%place, error = %e, "Could not geocode place");
                None
            },
        }
    }

    async fn route_between(&self, selection: &SearchSelection) -> Option<RouteResult> {
        let (from, to) = self.locate_pair(selection).await?;
        match self.router.route(&from, &to).await {
            Ok(route) => Some(route),
            Err(e) => {
                debug!(error = %e, "Route distance unavailable");
                None
            },
        }
    }
}

fn build_map_view(
    from: GeoLocation,
    to: GeoLocation,
    route: &RouteResult,
    summary: RouteSummary,
) -> MapView {
    MapView {
        center: from.midpoint(&to),
        zoom: MAP_ZOOM,
        markers: vec![
            MapMarker::new("From", from, "green", "circle"),
            MapMarker::new("To", to, "red", "diamond"),
        ],
        polyline: route.geometry().to_vec(),
        polyline_color: "blue".to_string(),
        polyline_weight: 5,
        polyline_tooltip: summary.tooltip(),
        info: summary.info_line(),
        summary,
    }
}
