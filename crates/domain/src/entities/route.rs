//! Driving route between two locations

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Number of segments the geometry is cut into when picking via points
const VIA_SEGMENTS: usize = 6;

/// A driving route returned by the routing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    geometry: Vec<GeoLocation>,
    duration_minutes: f64,
    distance_km: f64,
    via_coords: Vec<GeoLocation>,
}

/// Non-finite or negative upstream values become zero
fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Down-sample a geometry to a handful of points along the way.
///
/// Takes every `max(len / 6, 1)`-th point starting at the first. When the
/// stride does not land on the final point, the last sample is swapped for
/// it, so both endpoints are present for any non-empty geometry.
pub fn sample_via(geometry: &[GeoLocation]) -> Vec<GeoLocation> {
    let Some(last) = geometry.last() else {
        return Vec::new();
    };

    let step = (geometry.len() / VIA_SEGMENTS).max(1);
    let mut via: Vec<GeoLocation> = geometry.iter().step_by(step).copied().collect();

    if (geometry.len() - 1) % step != 0 {
        via.pop();
        via.push(*last);
    }
    via
}

impl RouteResult {
    /// Build a route, deriving the via points from the geometry
    pub fn new(geometry: Vec<GeoLocation>, duration_minutes: f64, distance_km: f64) -> Self {
        let via_coords = sample_via(&geometry);
        Self {
            geometry,
            duration_minutes: clamp_non_negative(duration_minutes),
            distance_km: clamp_non_negative(distance_km),
            via_coords,
        }
    }

    /// Build a route from the routing service's raw units
    pub fn from_meters_and_seconds(geometry: Vec<GeoLocation>, seconds: f64, meters: f64) -> Self {
        Self::new(geometry, seconds / 60.0, meters / 1000.0)
    }

    pub fn geometry(&self) -> &[GeoLocation] {
        &self.geometry
    }

    pub const fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn via_coords(&self) -> &[GeoLocation] {
        &self.via_coords
    }

    /// Via points without the two endpoints
    pub fn interior_via_coords(&self) -> &[GeoLocation] {
        match self.via_coords.len() {
            0..=2 => &[],
            n => &self.via_coords[1..n - 1],
        }
    }
}
