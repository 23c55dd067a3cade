//! Geocoding adapter - Implements GeocodingPort using integration_geo

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use integration_geo::{GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient};
use tracing::instrument;

/// Adapter for place-name lookups via Nominatim
#[derive(Debug)]
pub struct GeocodingAdapter {
    client: NominatimGeocodingClient,
}

impl GeocodingAdapter {
    pub const fn new(client: NominatimGeocodingClient) -> Self {
        Self { client }
    }

    /// Create an adapter with its own client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        NominatimGeocodingClient::new(config)
            .map(Self::new)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))
    }

    fn map_error(e: GeocodingError) -> ApplicationError {
        if e.is_not_found() {
            ApplicationError::NotFound(e.to_string())
        } else if e.is_retryable() {
            ApplicationError::UpstreamUnavailable(e.to_string())
        } else {
            ApplicationError::NotFound(format!("Unusable geocoding answer: {e}"))
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<GeoLocation, ApplicationError> {
        self.client.geocode(place).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, location: &GeoLocation) -> Result<String, ApplicationError> {
        self.client
            .reverse_geocode(location)
            .await
            .map_err(Self::map_error)
    }
}
