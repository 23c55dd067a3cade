//! Application layer - Use cases and orchestration
//!
//! Contains the bus finder use case, the route summarizer, per-user session
//! state and the port definitions the infrastructure layer implements.

pub mod error;
pub mod ports;
pub mod services;
pub mod session;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
pub use session::BusSession;
