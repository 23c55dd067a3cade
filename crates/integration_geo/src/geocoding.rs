//! Nominatim geocoding client
//!
//! Converts place names to coordinates and coordinates back to short place
//! names using the [Nominatim](https://nominatim.openstreetmap.org) API.
//!
//! Forward lookups are retried once on transient failure and memoized for
//! the lifetime of the client. Requests are spaced out to respect the
//! Nominatim usage policy of one request per second.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::labels::UNKNOWN_LOCALITY;
use domain::value_objects::GeoLocation;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::config::NominatimConfig;
use crate::error::GeocodingError;
use crate::models::NominatimPlace;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a place name to geographic coordinates
    async fn geocode(&self, place: &str) -> Result<GeoLocation, GeocodingError>;

    /// Name the locality a coordinate lies in
    async fn reverse_geocode(&self, location: &GeoLocation) -> Result<String, GeocodingError>;
}

/// Nominatim-based geocoding client with pacing, retry and memoization
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    /// `None` records a definitive "address not found"
    cache: Cache<String, Option<GeoLocation>>,
    last_request: Arc<Mutex<Instant>>,
}

fn map_send_error(e: &reqwest::Error) -> GeocodingError {
    if e.is_timeout() {
        GeocodingError::Timeout
    } else {
        GeocodingError::ConnectionFailed(e.to_string())
    }
}

fn check_status(status: StatusCode) -> Result<(), GeocodingError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodingError::RateLimitExceeded);
    }
    if !status.is_success() {
        return Err(GeocodingError::RequestFailed {
            status: status.as_u16(),
        });
    }
    Ok(())
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let now = Instant::now();
        let last_request = now
            .checked_sub(Duration::from_millis(config.min_interval_ms))
            .unwrap_or(now);

        Ok(Self {
            client,
            config: config.clone(),
            cache: Cache::builder().build(),
            last_request: Arc::new(Mutex::new(last_request)),
        })
    }

    /// Number of memoized place names
    pub async fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// Keep requests at least `min_interval_ms` apart
    async fn rate_limit(&self) {
        if self.config.min_interval_ms == 0 {
            return;
        }
        let interval = Duration::from_millis(self.config.min_interval_ms);
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < interval {
            let wait = interval.saturating_sub(elapsed);
            debug!(?wait, "Rate limiting geocoding request");
            tokio::time::sleep(wait).await;
        }
        *last = Instant::now();
    }

    /// One forward lookup against `/search`
    async fn search_once(&self, place: &str) -> Result<GeoLocation, GeocodingError> {
        self.rate_limit().await;

        let url = format!("{}/search", self.config.base_url);
        let mut params = vec![
            ("q", place.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;

        check_status(response.status())?;

        let results: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let (lat, lon) = results
            .first()
            .and_then(NominatimPlace::coordinates)
            .ok_or_else(|| GeocodingError::AddressNotFound(place.to_string()))?;

        GeoLocation::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))
    }

    /// Forward lookup with a single retry after a transient failure
    async fn search_with_retry(&self, place: &str) -> Result<GeoLocation, GeocodingError> {
        match self.search_once(place).await {
            Err(e) if e.is_retryable() => {
                warn!(%place, error = %e, "Geocoding failed, retrying once");
                tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                self.search_once(place).await
            },
            other => other,
        }
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<GeoLocation, GeocodingError> {
        if place.trim().is_empty() {
            return Err(GeocodingError::AddressNotFound(
                "Place name must not be empty".to_string(),
            ));
        }

        if let Some(cached) = self.cache.get(place).await {
            debug!(%place, "Geocoding cache hit");
            return cached.ok_or_else(|| GeocodingError::AddressNotFound(place.to_string()));
        }

        debug!(%place, "Geocoding place");
        let result = self.search_with_retry(place).await;

        match &result {
            Ok(location) => {
                self.cache.insert(place.to_string(), Some(*location)).await;
                debug!(%place, %location, "Geocoded place");
            },
            Err(e) if e.is_not_found() => {
                self.cache.insert(place.to_string(), None).await;
                debug!(%place, "Place not found");
            },
            Err(e) => warn!(%place, error = %e, "Geocoding gave up"),
        }

        result
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, location: &GeoLocation) -> Result<String, GeocodingError> {
        self.rate_limit().await;

        let url = format!("{}/reverse", self.config.base_url);
        let params = [
            ("lat", location.latitude().to_string()),
            ("lon", location.longitude().to_string()),
            ("format", "jsonv2".to_string()),
            ("addressdetails", "1".to_string()),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .timeout(Duration::from_secs(self.config.reverse_timeout_secs))
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;

        check_status(response.status())?;

        let place: NominatimPlace = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        if let Some(error) = place.error {
            return Err(GeocodingError::AddressNotFound(error));
        }

        Ok(place
            .locality()
            .unwrap_or_else(|| UNKNOWN_LOCALITY.to_string()))
    }
}
