//! Geographic service integration for TamilVandi
//!
//! Resolves place names to coordinates via
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org) and fetches
//! driving routes from [OpenRouteService](https://openrouteservice.org).
//!
//! # Architecture
//!
//! Each upstream is hidden behind a client trait. [`GeocodingClient`] is
//! implemented by [`NominatimGeocodingClient`], [`RoutingClient`] by
//! [`OrsRoutingClient`]. Both clients memoize definitive answers for the
//! lifetime of the process, so repeated lookups for the same place or the
//! same coordinate pair hit the network at most once.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geo::{NominatimConfig, NominatimGeocodingClient, GeocodingClient};
//!
//! let client = NominatimGeocodingClient::new(&NominatimConfig::default())?;
//! let chennai = client.geocode("Chennai").await?;
//! ```

mod config;
mod error;
mod geocoding;
mod models;
mod routing;

pub use config::{NominatimConfig, OrsConfig};
pub use error::{GeocodingError, RoutingError};
pub use geocoding::{GeocodingClient, NominatimGeocodingClient};
pub use models::NominatimAddress;
pub use routing::{OrsRoutingClient, RoutingClient};
