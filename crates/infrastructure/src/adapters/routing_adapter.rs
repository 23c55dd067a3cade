//! Routing adapter - Implements RoutingPort using integration_geo

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::entities::RouteResult;
use domain::value_objects::GeoLocation;
use integration_geo::{OrsConfig, OrsRoutingClient, RoutingClient, RoutingError};
use tracing::instrument;

/// Adapter for driving routes via OpenRouteService
#[derive(Debug)]
pub struct RoutingAdapter {
    client: OrsRoutingClient,
}

impl RoutingAdapter {
    pub const fn new(client: OrsRoutingClient) -> Self {
        Self { client }
    }

    /// Create an adapter with its own client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails
    /// to initialize.
    pub fn from_config(config: &OrsConfig) -> Result<Self, ApplicationError> {
        OrsRoutingClient::new(config)
            .map(Self::new)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))
    }

    fn map_error(e: RoutingError) -> ApplicationError {
        match e {
            RoutingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            e if e.is_retryable() => ApplicationError::UpstreamUnavailable(e.to_string()),
            e => ApplicationError::NotFound(e.to_string()),
        }
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self))]
    async fn route(
        &self,
        start: &GeoLocation,
        end: &GeoLocation,
    ) -> Result<RouteResult, ApplicationError> {
        self.client
            .get_route(start, end)
            .await
            .map_err(Self::map_error)
    }
}
