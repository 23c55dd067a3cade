//! Geocoding and routing error types

use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Geocoding service answered with a non-success status
    #[error("Geocoding request failed: HTTP {status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
    },

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Address could not be resolved to coordinates
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Rate limit exceeded (max 1 req/sec for Nominatim)
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    /// Returns true for transient failures worth one more attempt
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::RateLimitExceeded | Self::Timeout => true,
            Self::RequestFailed { status } => *status >= 500,
            Self::ParseError(_) | Self::AddressNotFound(_) => false,
        }
    }

    /// Returns true when the service gave a definitive "no such place"
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::AddressNotFound(_))
    }
}

/// Errors that can occur while fetching a driving route
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Connection to the routing service failed
    #[error("Routing connection failed: {0}")]
    ConnectionFailed(String),

    /// The routing service returned a structured error
    #[error("Routing API error (code {code}): {message}")]
    ApiError {
        /// OpenRouteService error code
        code: u32,
        /// Human-readable message
        message: String,
    },

    /// Non-success status without a structured body
    #[error("Routing request failed: HTTP {status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
    },

    /// Failed to parse the routing response
    #[error("Routing parse error: {0}")]
    ParseError(String),

    /// The response held no route
    #[error("No route found")]
    NoRouteFound,

    /// Rate limit exceeded
    #[error("Routing rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Routing request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Configuration error
    #[error("Routing configuration error: {0}")]
    ConfigurationError(String),
}

impl RoutingError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::RateLimitExceeded | Self::Timeout { .. } => true,
            Self::RequestFailed { status } => *status >= 500,
            Self::ApiError { .. }
            | Self::ParseError(_)
            | Self::NoRouteFound
            | Self::ConfigurationError(_) => false,
        }
    }
}
