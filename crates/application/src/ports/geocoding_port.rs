//! Geocoding service port

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for converting between place names and coordinates
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a place name to coordinates
    ///
    /// Returns `NotFound` when the service has no answer for the name and
    /// `UpstreamUnavailable` when it could not be asked.
    async fn geocode(&self, place: &str) -> Result<GeoLocation, ApplicationError>;

    /// Name the locality a coordinate lies in
    async fn reverse_geocode(&self, location: &GeoLocation) -> Result<String, ApplicationError>;
}
