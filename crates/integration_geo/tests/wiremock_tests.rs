//! Integration tests for the geocoding and routing clients (wiremock-based)

use domain::value_objects::GeoLocation;
use integration_geo::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient, OrsConfig,
    OrsRoutingClient, RoutingClient, RoutingError,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn nominatim_for_mock(base_url: &str) -> NominatimConfig {
    NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    }
}

fn ors_for_mock(base_url: &str) -> OrsConfig {
    OrsConfig {
        base_url: base_url.to_string(),
        ..OrsConfig::for_testing()
    }
}

const fn chennai_json() -> &'static str {
    r#"[{"lat": "13.0836939", "lon": "80.270186", "display_name": "Chennai, Tamil Nadu, India"}]"#
}

const fn route_json() -> &'static str {
    r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [
                    [80.2702, 13.0837], [79.4920, 11.9401], [79.1313, 10.7905],
                    [78.6880, 10.3673], [78.1198, 9.9252]
                ]
            },
            "properties": {"summary": {"distance": 462345.6, "duration": 28000.0}}
        }]
    }"#
}

// ============================================================================
// Geocoding
// ============================================================================

#[tokio::test]
async fn test_geocode_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Chennai"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", "tamilvandi-app"))
        .respond_with(ResponseTemplate::new(200).set_body_string(chennai_json()))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let location = client.geocode("Chennai").await.unwrap();

    assert!((location.latitude() - 13.083_693_9).abs() < 1e-9);
    assert!((location.longitude() - 80.270_186).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_is_memoized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(chennai_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let first = client.geocode("Chennai").await.unwrap();
    let second = client.geocode("Chennai").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(client.cached_entries().await, 1);
}

#[tokio::test]
async fn test_geocode_not_found_is_memoized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();

    let err = client.geocode("Trichy Junction XYZ").await.unwrap_err();
    assert!(matches!(err, GeocodingError::AddressNotFound(_)));
    let err = client.geocode("Trichy Junction XYZ").await.unwrap_err();
    assert!(matches!(err, GeocodingError::AddressNotFound(_)));
}

#[tokio::test]
async fn test_geocode_retries_once_then_gives_up() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.geocode("Madurai").await.unwrap_err();

    assert!(matches!(err, GeocodingError::RequestFailed { status: 503 }));
    assert_eq!(client.cached_entries().await, 0);
}

#[tokio::test]
async fn test_geocode_recovers_on_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(chennai_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    assert!(client.geocode("Chennai").await.is_ok());
}

#[tokio::test]
async fn test_geocode_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.geocode("Salem").await.unwrap_err();
    assert!(matches!(err, GeocodingError::RequestFailed { status: 400 }));
}

#[tokio::test]
async fn test_geocode_timeout_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(chennai_json())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        timeout_secs: 1,
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();
    let err = client.geocode("Chennai").await.unwrap_err();
    assert!(matches!(err, GeocodingError::Timeout));
}

#[tokio::test]
async fn test_country_filter_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("countrycodes", "in"))
        .respond_with(ResponseTemplate::new(200).set_body_string(chennai_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        country_filter: "in".to_string(),
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();
    assert!(client.geocode("Chennai").await.is_ok());
}

#[tokio::test]
async fn test_reverse_geocode_uses_address_block() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "jsonv2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lat": "10.79",
            "lon": "79.13",
            "display_name": "NH 45, Manapparai, Tiruchirappalli, Tamil Nadu, India",
            "address": {"road": "NH 45", "city": "Tiruchirappalli"}
        })))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let name = client
        .reverse_geocode(&GeoLocation::new(10.79, 79.13).unwrap())
        .await
        .unwrap();
    assert_eq!(name, "Tiruchirappalli");
}

#[tokio::test]
async fn test_reverse_geocode_without_locality_is_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "Bay of Bengal"
        })))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let name = client
        .reverse_geocode(&GeoLocation::new(12.0, 82.0).unwrap())
        .await
        .unwrap();
    assert_eq!(name, "Unknown");
}

#[tokio::test]
async fn test_reverse_geocode_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Unable to geocode"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let result = client
        .reverse_geocode(&GeoLocation::new(0.0, 0.0).unwrap())
        .await;
    assert!(matches!(result, Err(GeocodingError::AddressNotFound(_))));
}

#[tokio::test]
async fn test_reverse_geocode_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let result = client
        .reverse_geocode(&GeoLocation::new(10.0, 78.0).unwrap())
        .await;
    assert!(result.is_err());
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_route_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-car/geojson"))
        .and(header("authorization", "test-key"))
        .and(body_json(json!({
            "coordinates": [[80.2702, 13.0837], [78.1198, 9.9252]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OrsRoutingClient::new(&ors_for_mock(&server.uri())).unwrap();
    let start = GeoLocation::new(13.0837, 80.2702).unwrap();
    let end = GeoLocation::new(9.9252, 78.1198).unwrap();

    let route = client.get_route(&start, &end).await.unwrap();
    assert_eq!(route.geometry().len(), 5);
    assert!((route.distance_km() - 462.3456).abs() < 1e-9);
    assert!((route.duration_minutes() - 28000.0 / 60.0).abs() < 1e-9);
    assert_eq!(route.via_coords().first(), route.geometry().first());
    assert_eq!(route.via_coords().last(), route.geometry().last());
}

#[tokio::test]
async fn test_route_is_memoized_per_pair() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-car/geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_string(route_json()))
        .expect(2)
        .mount(&server)
        .await;

    let client = OrsRoutingClient::new(&ors_for_mock(&server.uri())).unwrap();
    let a = GeoLocation::new(13.0837, 80.2702).unwrap();
    let b = GeoLocation::new(9.9252, 78.1198).unwrap();

    let first = client.get_route(&a, &b).await.unwrap();
    let second = client.get_route(&a, &b).await.unwrap();
    assert_eq!(first, second);

    // The reverse direction is a different key
    client.get_route(&b, &a).await.unwrap();
    assert_eq!(client.cached_entries().await, 2);
}

#[tokio::test]
async fn test_route_empty_features() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-car/geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = OrsRoutingClient::new(&ors_for_mock(&server.uri())).unwrap();
    let a = GeoLocation::new(13.0, 80.0).unwrap();
    let b = GeoLocation::new(9.0, 78.0).unwrap();

    assert!(matches!(
        client.get_route(&a, &b).await,
        Err(RoutingError::NoRouteFound)
    ));
    assert!(matches!(
        client.get_route(&a, &b).await,
        Err(RoutingError::NoRouteFound)
    ));
}

#[tokio::test]
async fn test_route_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-car/geojson"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 2010, "message": "Could not find routable point within a radius of 350.0 meters"}
        })))
        .mount(&server)
        .await;

    let client = OrsRoutingClient::new(&ors_for_mock(&server.uri())).unwrap();
    let a = GeoLocation::new(13.0, 80.0).unwrap();
    let b = GeoLocation::new(9.0, 78.0).unwrap();

    let err = client.get_route(&a, &b).await.unwrap_err();
    assert!(matches!(err, RoutingError::ApiError { code: 2010, .. }));
}

#[tokio::test]
async fn test_route_server_error_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/driving-car/geojson"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = OrsRoutingClient::new(&ors_for_mock(&server.uri())).unwrap();
    let a = GeoLocation::new(13.0, 80.0).unwrap();
    let b = GeoLocation::new(9.0, 78.0).unwrap();

    assert!(client.get_route(&a, &b).await.is_err());
    assert!(client.get_route(&a, &b).await.is_err());
    assert_eq!(client.cached_entries().await, 0);
}
