//! Integration tests for the HTTP provider backends.
//!
//! Each test stands up a local `wiremock` server and points the configured
//! endpoint at it, so no real network traffic is made.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hospital_locator::geo::device::IpLocator;
use hospital_locator::geo::geoapify::GeoapifyBackend;
use hospital_locator::geo::nominatim::NominatimBackend;
use hospital_locator::geo::opencage::OpenCageBackend;
use hospital_locator::geo::{AddressResolver, HospitalFinder, LocationResolver, PositionProvider};
use hospital_locator::{Config, Coordinates, PositionError};

/// Builds a config whose every endpoint points at the mock server.
fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.endpoints.places = server.uri();
    config.endpoints.geocode = server.uri();
    config.endpoints.reverse = server.uri();
    config.endpoints.ip = format!("{}/json", server.uri());
    config.api_keys.geoapify = "places-key".to_string();
    config.api_keys.opencage = "geocode-key".to_string();
    config.http.user_agent = "hospital-locator-test/0.1".to_string();
    config
}

// ---------------------------------------------------------------------------
// Geoapify places
// ---------------------------------------------------------------------------

#[tokio::test]
async fn places_request_carries_circle_filter_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .and(query_param("categories", "healthcare.hospital"))
        .and(query_param("filter", "circle:-75,40,5000"))
        .and(query_param("limit", "10"))
        .and(query_param("apiKey", "places-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {
                    "lat": 40.01, "lon": -75.01, "name": "Near Clinic", "place_id": "near"
                }},
                {"type": "Feature", "properties": {"lat": 41.0, "lon": -75.0, "place_id": "far"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = GeoapifyBackend::new(&test_config(&server)).unwrap();
    let facilities = backend.find_nearby(Coordinates::new(40.0, -75.0)).await.unwrap();

    assert_eq!(facilities.len(), 2);
    assert_eq!(facilities[0].id, "near");
    assert_eq!(facilities[0].name, "Near Clinic");
    assert_eq!(facilities[1].name, "Unnamed hospital");
}

#[tokio::test]
async fn places_error_status_fails_the_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid apiKey"})))
        .mount(&server)
        .await;

    let backend = GeoapifyBackend::new(&test_config(&server)).unwrap();
    let result = backend.find_nearby(Coordinates::new(40.0, -75.0)).await;

    assert!(result.is_err(), "expected Err, got: {result:?}");
}

#[tokio::test]
async fn places_malformed_body_fails_the_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let backend = GeoapifyBackend::new(&test_config(&server)).unwrap();
    assert!(backend.find_nearby(Coordinates::new(40.0, -75.0)).await.is_err());
}

// ---------------------------------------------------------------------------
// OpenCage forward geocoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn geocode_returns_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/v1/json"))
        .and(query_param("q", "10 Main St"))
        .and(query_param("key", "geocode-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"geometry": {"lat": 40.0, "lng": -75.0}, "formatted": "10 Main St, Philadelphia"}
            ]
        })))
        .mount(&server)
        .await;

    let backend = OpenCageBackend::new(&test_config(&server)).unwrap();
    let location = backend.geocode("10 Main St").await.unwrap().unwrap();

    assert_eq!(location.coordinates(), Coordinates::new(40.0, -75.0));
    assert_eq!(location.display_name, "10 Main St, Philadelphia");
}

#[tokio::test]
async fn geocode_without_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/v1/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let backend = OpenCageBackend::new(&test_config(&server)).unwrap();
    assert_eq!(backend.geocode("Atlantis").await.unwrap(), None);
}

#[tokio::test]
async fn geocode_server_error_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/v1/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = OpenCageBackend::new(&test_config(&server)).unwrap();
    assert!(backend.geocode("10 Main St").await.is_err());
}

// ---------------------------------------------------------------------------
// Nominatim reverse geocoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reverse_geocode_returns_display_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "40.01"))
        .and(query_param("lon", "-75.01"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "5 Near St, Philadelphia"
        })))
        .mount(&server)
        .await;

    let backend = NominatimBackend::new(&test_config(&server)).unwrap();
    let address = backend.reverse_geocode(Coordinates::new(40.01, -75.01)).await.unwrap();

    assert_eq!(address.as_deref(), Some("5 Near St, Philadelphia"));
}

#[tokio::test]
async fn reverse_geocode_error_body_is_no_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Unable to geocode"})))
        .mount(&server)
        .await;

    let backend = NominatimBackend::new(&test_config(&server)).unwrap();
    assert_eq!(backend.reverse_geocode(Coordinates::new(0.0, 0.0)).await.unwrap(), None);
}

#[tokio::test]
async fn reverse_geocode_not_found_is_no_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let backend = NominatimBackend::new(&test_config(&server)).unwrap();
    assert_eq!(backend.reverse_geocode(Coordinates::new(0.0, 0.0)).await.unwrap(), None);
}

#[tokio::test]
async fn reverse_geocode_server_error_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let backend = NominatimBackend::new(&test_config(&server)).unwrap();
    assert!(backend.reverse_geocode(Coordinates::new(0.0, 0.0)).await.is_err());
}

// ---------------------------------------------------------------------------
// ip-api device position
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ip_position_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "lat": 40.0, "lon": -75.0, "city": "Philadelphia"
        })))
        .mount(&server)
        .await;

    let locator = IpLocator::new(&test_config(&server)).unwrap();
    assert_eq!(locator.current_position().await, Ok(Coordinates::new(40.0, -75.0)));
}

#[tokio::test]
async fn ip_position_fail_status_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail", "message": "reserved range"
        })))
        .mount(&server)
        .await;

    let locator = IpLocator::new(&test_config(&server)).unwrap();
    assert_eq!(
        locator.current_position().await,
        Err(PositionError::Unavailable("reserved range".to_string()))
    );
}

#[tokio::test]
async fn ip_position_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "lat": 40.0, "lon": -75.0}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.location.timeout_ms = 50;
    let locator = IpLocator::new(&config).unwrap();

    assert_eq!(locator.current_position().await, Err(PositionError::Timeout(50)));
}
