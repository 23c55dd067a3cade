//! Domain entities - the schedule and what a route lookup produces

mod route;
mod schedule;
mod trip;

pub use route::{RouteResult, sample_via};
pub use schedule::{ALL_TYPES, Schedule};
pub use trip::Trip;
