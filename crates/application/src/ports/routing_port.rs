//! Driving route port

use async_trait::async_trait;
use domain::entities::RouteResult;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching driving routes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Fetch the driving route between two points
    ///
    /// Returns `NotFound` when the service knows no route between them.
    async fn route(
        &self,
        start: &GeoLocation,
        end: &GeoLocation,
    ) -> Result<RouteResult, ApplicationError>;
}
