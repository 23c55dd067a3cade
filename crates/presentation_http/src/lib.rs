//! TamilVandi HTTP presentation layer
//!
//! JSON API over the bus finder: selector values, per-user sessions,
//! schedule search and the route map (JSON or GeoJSON).

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use middleware::{RequestId, RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::{create_app, create_router};
pub use server::{ShutdownOutcome, serve_until};
pub use state::{AppState, SessionRegistry};
