//! Per-user session state
//!
//! A session remembers the last search and whether the user asked to see
//! the route map. It is passed explicitly to every interaction; there is no
//! process-wide session.

use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;
use crate::services::{SearchOutcome, SearchSelection};

/// State carried between one user's requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusSession {
    last_selection: Option<SearchSelection>,
    last_search_found_trips: bool,
    map_requested: bool,
}

impl BusSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a completed search; the map flag is left as it is
    pub fn record_search(&mut self, outcome: &SearchOutcome) {
        self.last_selection = Some(outcome.selection.clone());
        self.last_search_found_trips = outcome.found_trips();
    }

    /// Ask for the map view of the last search.
    ///
    /// Only allowed once a search has produced trips; otherwise the flag is
    /// left unchanged.
    pub fn request_map_view(&mut self) -> Result<(), ApplicationError> {
        if !self.last_search_found_trips {
            return Err(ApplicationError::Conflict(
                "Search for buses before opening the route map".to_string(),
            ));
        }
        self.map_requested = true;
        Ok(())
    }

    pub const fn is_map_view_requested(&self) -> bool {
        self.map_requested
    }

    pub fn last_selection(&self) -> Option<&SearchSelection> {
        self.last_selection.as_ref()
    }

    pub const fn last_search_found_trips(&self) -> bool {
        self.last_search_found_trips
    }
}
