//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod service_class;
mod session_id;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use service_class::ServiceClass;
pub use session_id::SessionId;
