//! Route map handlers
//!
//! The map is only available once the session's last search found trips
//! and the user asked for it. Non-fatal outcomes (a city that cannot be
//! placed, no road route) come back as a warning instead of an error.

use application::{MapOutcome, MapView, SearchSelection};
use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{error::ApiError, handlers::sessions::load_session, state::AppState};

/// Content type for GeoJSON documents
pub const GEOJSON_CONTENT_TYPE: &str = "application/geo+json";

/// Response for a map view request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapRequestedResponse {
    pub map_requested: bool,
}

/// Rendered map, or the warning explaining why there is none
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<MapOutcome> for MapResponse {
    fn from(outcome: MapOutcome) -> Self {
        let warning = outcome.warning().map(str::to_string);
        match outcome {
            MapOutcome::Ready(view) => Self {
                map: Some(*view),
                warning,
            },
            MapOutcome::LocationsNotFound | MapOutcome::NoRoute => Self { map: None, warning },
        }
    }
}

/// Ask for the map view of the session's last search
#[instrument(skip(state))]
pub async fn request_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MapRequestedResponse>, ApiError> {
    let session = load_session(&state, &id).await?;
    session.lock().request_map_view()?;
    Ok(Json(MapRequestedResponse {
        map_requested: true,
    }))
}

/// Render the map for the session's last search
#[instrument(skip(state))]
pub async fn get_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MapResponse>, ApiError> {
    let outcome = map_outcome(&state, &id).await?;
    Ok(Json(MapResponse::from(outcome)))
}

/// Render the map for the session's last search as GeoJSON
#[instrument(skip(state))]
pub async fn get_map_geojson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = map_outcome(&state, &id).await?;
    match outcome {
        MapOutcome::Ready(view) => Ok((
            [(header::CONTENT_TYPE, GEOJSON_CONTENT_TYPE)],
            Json(map_to_geojson(&view)),
        )),
        other => Err(ApiError::NotFound(
            other.warning().unwrap_or_default().to_string(),
        )),
    }
}

async fn map_outcome(state: &AppState, id: &str) -> Result<MapOutcome, ApiError> {
    let session = load_session(state, id).await?;
    let selection = requested_selection(&session.lock())?;

    let outcome = state.bus_finder.map_view(&selection).await?;
    info!(ready = outcome.view().is_some(), "Map view assembled");
    Ok(outcome)
}

fn requested_selection(session: &application::BusSession) -> Result<SearchSelection, ApiError> {
    if !session.is_map_view_requested() {
        return Err(ApiError::Conflict(
            "Request the route map before fetching it".to_string(),
        ));
    }
    session
        .last_selection()
        .cloned()
        .ok_or_else(|| ApiError::Conflict("No search in this session".to_string()))
}

/// Markers as points and the route as a line string, in `[lon, lat]` order
pub fn map_to_geojson(view: &MapView) -> GeoJson {
    let mut features = Vec::with_capacity(view.markers.len() + 1);

    for marker in &view.markers {
        let mut feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(
                marker.location.lon_lat().to_vec(),
            ))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("type", "marker");
        feature.set_property("tooltip", marker.tooltip.clone());
        feature.set_property("color", marker.color.clone());
        feature.set_property("icon", marker.icon.clone());
        features.push(feature);
    }

    let line = view
        .polyline
        .iter()
        .map(|point| point.lon_lat().to_vec())
        .collect();
    let mut route = Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: None,
        properties: None,
        foreign_members: None,
    };
    route.set_property("type", "route");
    route.set_property("tooltip", view.polyline_tooltip.clone());
    route.set_property("color", view.polyline_color.clone());
    route.set_property("weight", view.polyline_weight);
    route.set_property("duration", view.summary.duration_label.clone());
    route.set_property("distance", view.summary.distance_label.clone());
    if let Some(via) = &view.summary.via_label {
        route.set_property("via", via.clone());
    }
    route.set_property("info", view.info.clone());
    features.push(route);

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use application::{BusSession, MapMarker, RouteSummary};
    use domain::GeoLocation;

    use super::*;

    fn sample_view() -> MapView {
        let from = GeoLocation::new(13.08, 80.27).unwrap();
        let to = GeoLocation::new(9.93, 78.12).unwrap();
        let summary = RouteSummary {
            duration_label: "6 hr 55 min".to_string(),
            distance_label: "462.3 km".to_string(),
            via_label: Some("Tiruchirappalli".to_string()),
            via_places: vec!["Tiruchirappalli".to_string()],
            adjusted_duration_minutes: 415.0,
            average_speed_kmph: Some(66.8),
        };
        MapView {
            center: from.midpoint(&to),
            zoom: 8,
            markers: vec![
                MapMarker {
                    tooltip: "From".to_string(),
                    location: from,
                    color: "green".to_string(),
                    icon: "circle".to_string(),
                },
                MapMarker {
                    tooltip: "To".to_string(),
                    location: to,
                    color: "red".to_string(),
                    icon: "diamond".to_string(),
                },
            ],
            polyline: vec![from, to],
            polyline_color: "blue".to_string(),
            polyline_weight: 5,
            polyline_tooltip: summary.tooltip(),
            info: summary.info_line(),
            summary,
        }
    }

    #[test]
    fn geojson_has_markers_and_route() {
        let GeoJson::FeatureCollection(collection) = map_to_geojson(&sample_view()) else {
            unreachable!("Expected a feature collection");
        };
        assert_eq!(collection.features.len(), 3);

        let from = &collection.features[0];
        assert_eq!(*from.property("tooltip").unwrap(), "From");
        let Some(Geometry {
            value: Value::Point(coords),
            ..
        }) = &from.geometry
        else {
            unreachable!("Expected a point");
        };
        assert_eq!(coords, &vec![80.27, 13.08]);

        let route = &collection.features[2];
        assert_eq!(*route.property("type").unwrap(), "route");
        assert_eq!(*route.property("via").unwrap(), "Tiruchirappalli");
        assert_eq!(*route.property("weight").unwrap(), 5);
    }

    #[test]
    fn ready_outcome_has_no_warning() {
        let resp = MapResponse::from(MapOutcome::Ready(Box::new(sample_view())));
        assert!(resp.map.is_some());
        assert!(resp.warning.is_none());
    }

    #[test]
    fn warning_outcomes_have_no_map() {
        let resp = MapResponse::from(MapOutcome::LocationsNotFound);
        assert!(resp.map.is_none());
        assert!(resp.warning.unwrap().contains("Could not find map locations"));

        let resp = MapResponse::from(MapOutcome::NoRoute);
        assert_eq!(
            resp.warning.as_deref(),
            Some("No route found between the selected cities.")
        );
    }

    #[test]
    fn map_must_be_requested_first() {
        let session = BusSession::new();
        assert!(matches!(
            requested_selection(&session),
            Err(ApiError::Conflict(_))
        ));
    }
}
