//! Integration tests for `GeocodeClient` using wiremock HTTP mocks.

use parkfinder_client::{ClientError, GeocodeClient, GeocodeOptions};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> GeocodeClient {
    GeocodeClient::new(
        &format!("{}/search", server.uri()),
        5,
        "parkfinder-test/0.1",
        GeocodeOptions::default(),
    )
    .expect("client construction should not fail")
}

#[tokio::test]
async fn search_sends_locality_qualified_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("q", "Westfalenpark Dortmund"))
        .and(query_param("addressdetails", "1"))
        .and(query_param("limit", "5"))
        .and(header("accept-language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let places = test_client(&server)
        .search("Westfalenpark")
        .await
        .expect("empty array should parse");
    assert!(places.is_empty());
}

#[tokio::test]
async fn search_parses_string_coordinates() {
    let server = MockServer::start().await;

    let body = json!([
        {
            "place_id": 1,
            "display_name": "Westfalenpark, Dortmund, Germany",
            "lat": "51.4936",
            "lon": "7.4769",
            "address": { "city": "Dortmund" }
        },
        {
            "place_id": 2,
            "display_name": "Signal Iduna Park, Dortmund, Germany",
            "lat": "51.4926",
            "lon": "7.4519"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let places = test_client(&server)
        .search("park")
        .await
        .expect("should parse places");

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].label, "Westfalenpark, Dortmund, Germany");
    assert!((places[0].location.latitude - 51.4936).abs() < 1e-9);
    assert!((places[1].location.longitude - 7.4519).abs() < 1e-9);
}

#[tokio::test]
async fn search_skips_places_with_bad_coordinates() {
    let server = MockServer::start().await;

    let body = json!([
        { "display_name": "Broken", "lat": "n/a", "lon": "7.4" },
        { "display_name": "Fine", "lat": "51.5", "lon": "7.4" }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let places = test_client(&server).search("xyz").await.unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].label, "Fine");
}

#[tokio::test]
async fn search_reports_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).search("Hauptbahnhof").await;
    assert!(
        matches!(result, Err(ClientError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn search_reports_rate_limit_status_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client(&server).search("Hauptbahnhof").await;
    assert!(
        matches!(result, Err(ClientError::UnexpectedStatus { status: 429, .. })),
        "expected UnexpectedStatus(429), got: {result:?}"
    );
}
