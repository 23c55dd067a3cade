//! Application services - use case implementations

mod bus_finder;
mod route_summarizer;

pub use bus_finder::{
    BusFinderService, Filters, MapMarker, MapOutcome, MapView, SearchOutcome, SearchSelection,
};
pub use route_summarizer::{RouteSummarizer, RouteSummary};
