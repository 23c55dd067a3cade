//! Selector values for the search form

use application::Filters;
use axum::{Json, extract::State};

use crate::state::AppState;

/// Origins, destinations and bus types offered by the schedule
pub async fn list_filters(State(state): State<AppState>) -> Json<Filters> {
    Json(state.bus_finder.filters())
}
