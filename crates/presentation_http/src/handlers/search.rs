//! Schedule search handler

use application::{SearchOutcome, SearchSelection};
use axum::{
    Json,
    extract::{Path, State},
};
use domain::{ALL_TYPES, Trip};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::ApiError, handlers::sessions::load_session, middleware::ValidatedJson,
    state::AppState,
};

/// Footer shown under a non-empty result list
pub const RESULTS_FOOTER: &str = "Thanks for using Tamilvandi | Safe traveling 🚌";

fn default_bus_type() -> String {
    ALL_TYPES.to_string()
}

/// Search request body
#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub origin: String,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub destination: String,
    /// Bus type filter, `"All"` when omitted
    #[serde(default = "default_bus_type")]
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub bus_type: String,
}

impl From<SearchRequest> for SearchSelection {
    fn from(req: SearchRequest) -> Self {
        Self::new(req.origin, req.destination, req.bus_type)
    }
}

/// One result card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripCard {
    pub corporation: String,
    pub trip_name: String,
    pub departure_time: String,
    pub bus_type: String,
    /// Road distance label, when the route could be looked up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

impl TripCard {
    fn new(trip: Trip, distance: Option<String>) -> Self {
        Self {
            corporation: trip.corporation,
            trip_name: trip.trip_name,
            departure_time: trip.departure_time,
            bus_type: trip.bus_type,
            distance,
        }
    }
}

/// Search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub message: String,
    pub trips: Vec<TripCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        let distance = outcome.distance_label();
        let footer = outcome.found_trips().then(|| RESULTS_FOOTER.to_string());
        let trips = outcome
            .trips
            .into_iter()
            .map(|trip| TripCard::new(trip, distance.clone()))
            .collect();

        Self {
            message: outcome.message,
            trips,
            distance,
            footer,
        }
    }
}

/// Run a search and remember it in the session
#[instrument(skip(state, request))]
pub async fn search(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let session = load_session(&state, &id).await?;

    let selection = SearchSelection::from(request);
    let outcome = state.bus_finder.search(&selection).await?;
    info!(trips = outcome.trips.len(), "Search completed");

    session.lock().record_search(&outcome);

    Ok(Json(SearchResponse::from(outcome)))
}
