//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A place is not part of the schedule's vocabulary
    #[error("Unknown {kind}: {value}")]
    UnknownPlace { kind: String, value: String },
}

impl DomainError {
    /// Create an unknown-origin error
    pub fn unknown_origin(value: impl Into<String>) -> Self {
        Self::UnknownPlace {
            kind: "origin".to_string(),
            value: value.into(),
        }
    }

    /// Create an unknown-destination error
    pub fn unknown_destination(value: impl Into<String>) -> Self {
        Self::UnknownPlace {
            kind: "destination".to_string(),
            value: value.into(),
        }
    }
}
