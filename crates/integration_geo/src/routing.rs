//! OpenRouteService driving-route client
//!
//! Fetches car routes from the OpenRouteService directions API in GeoJSON
//! form. Answers are memoized per coordinate pair for the lifetime of the
//! client.

use std::time::Duration;

use async_trait::async_trait;
use domain::entities::RouteResult;
use domain::value_objects::GeoLocation;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::OrsConfig;
use crate::error::RoutingError;
use crate::models::{OrsDirections, OrsErrorPayload};

const DIRECTIONS_PATH: &str = "/v2/directions/driving-car/geojson";

/// Exact bit patterns of start and end coordinates
type RouteKey = ((u64, u64), (u64, u64));

/// Trait for routing clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Fetch the driving route from `start` to `end`
    async fn get_route(
        &self,
        start: &GeoLocation,
        end: &GeoLocation,
    ) -> Result<RouteResult, RoutingError>;
}

/// OpenRouteService client with per-pair memoization
#[derive(Debug)]
pub struct OrsRoutingClient {
    client: Client,
    config: OrsConfig,
    /// `None` records a definitive "no route"
    cache: Cache<RouteKey, Option<RouteResult>>,
}

impl OrsRoutingClient {
    /// Create a new OpenRouteService client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &OrsConfig) -> Result<Self, RoutingError> {
        if config.api_key.trim().is_empty() {
            return Err(RoutingError::ConfigurationError(
                "OpenRouteService API key is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("tamilvandi/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            cache: Cache::builder().build(),
        })
    }

    /// Number of memoized coordinate pairs
    pub async fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// Turn a directions body into a route
    fn parse_directions(body: &str) -> Result<RouteResult, RoutingError> {
        let directions: OrsDirections =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let feature = directions
            .features
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRouteFound)?;

        let geometry = feature
            .geometry
            .coordinates
            .iter()
            .filter(|pair| pair.len() >= 2)
            .map(|pair| GeoLocation::from_lon_lat([pair[0], pair[1]]))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let summary = feature.properties.summary;
        Ok(RouteResult::from_meters_and_seconds(
            geometry,
            summary.duration,
            summary.distance,
        ))
    }

    /// Map a non-success response to an error
    fn status_error(status: StatusCode, body: &str) -> RoutingError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return RoutingError::RateLimitExceeded;
        }
        match serde_json::from_str::<OrsErrorPayload>(body) {
            Ok(payload) => RoutingError::ApiError {
                code: payload.error.code,
                message: payload.error.message,
            },
            Err(_) => RoutingError::RequestFailed {
                status: status.as_u16(),
            },
        }
    }

    async fn fetch(&self, start: &GeoLocation, end: &GeoLocation) -> Result<RouteResult, RoutingError> {
        let url = format!("{}{DIRECTIONS_PATH}", self.config.base_url);
        let body = json!({ "coordinates": [start.lon_lat(), end.lon_lat()] });

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoutingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    RoutingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &text));
        }

        Self::parse_directions(&text)
    }
}

#[async_trait]
impl RoutingClient for OrsRoutingClient {
    #[instrument(skip(self), fields(start = %start, end = %end))]
    async fn get_route(
        &self,
        start: &GeoLocation,
        end: &GeoLocation,
    ) -> Result<RouteResult, RoutingError> {
        let key = (start.bits(), end.bits());

        if let Some(cached) = self.cache.get(&key).await {
            debug!("Route cache hit");
            return cached.ok_or(RoutingError::NoRouteFound);
        }

        let result = self.fetch(start, end).await;

        match &result {
            Ok(route) => {
                debug!(
                    points = route.geometry().len(),
                    distance_km = route.distance_km(),
                    duration_min = route.duration_minutes(),
                    "Route fetched"
                );
                self.cache.insert(key, Some(route.clone())).await;
            },
            Err(RoutingError::NoRouteFound) => {
                warn!("Routing service returned no route");
                self.cache.insert(key, None).await;
            },
            Err(e) => warn!(error = %e, "Route fetch failed"),
        }

        result
    }
}
