//! Domain layer for TamilVandi
//!
//! Contains the bus schedule model, route results, and the pure labelling
//! rules used when summarizing a route. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod labels;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
