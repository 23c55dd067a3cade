//! Raw response models for Nominatim and OpenRouteService

use serde::Deserialize;

/// One Nominatim search or reverse result
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimPlace {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Option<NominatimAddress>,
    /// Set instead of the other fields when the lookup failed
    pub error: Option<String>,
}

/// Structured address block of a Nominatim result (`addressdetails`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub county: Option<String>,
}

impl NominatimAddress {
    /// First populated settlement-level field, from city down to county
    pub fn settlement(&self) -> Option<&str> {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.municipality,
            &self.county,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
    }
}

impl NominatimPlace {
    /// Short place name for a reverse lookup result.
    ///
    /// Prefers the structured address block and falls back to the third
    /// comma-separated component of `display_name`.
    pub fn locality(&self) -> Option<String> {
        if let Some(name) = self.address.as_ref().and_then(NominatimAddress::settlement) {
            return Some(name.to_string());
        }

        self.display_name
            .as_deref()
            .and_then(|name| name.split(',').nth(2))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    }

    /// Parsed `(lat, lon)`, if both are present and numeric
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.as_deref()?.parse().ok()?;
        let lon = self.lon.as_deref()?.parse().ok()?;
        Some((lat, lon))
    }
}

/// OpenRouteService directions response in GeoJSON form
#[derive(Debug, Deserialize)]
pub(crate) struct OrsDirections {
    #[serde(default)]
    pub features: Vec<OrsFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrsFeature {
    pub geometry: OrsGeometry,
    #[serde(default)]
    pub properties: OrsProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrsGeometry {
    /// `[lon, lat]` or `[lon, lat, elevation]`
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrsProperties {
    #[serde(default)]
    pub summary: OrsSummary,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrsSummary {
    /// Seconds
    #[serde(default)]
    pub duration: f64,
    /// Meters
    #[serde(default)]
    pub distance: f64,
}

/// Structured error body returned by OpenRouteService
#[derive(Debug, Deserialize)]
pub(crate) struct OrsErrorPayload {
    pub error: OrsErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrsErrorDetail {
    pub code: u32,
    pub message: String,
}
