//! Integration tests for the enrichment pipeline
//!
//! These tests use wiremock to stand in for the geocoding, nearby-search,
//! and place-details endpoints, plus the business websites the social
//! enricher scrapes, and run the full pipeline end-to-end.

use placelens::config::{Config, OutputConfig, ProviderConfig, SearchConfig};
use placelens::pipeline::{Pipeline, SearchRequest};
use placelens::PlacelensError;
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing every endpoint at the mock server
fn create_test_config(server_uri: &str, page_token_delay_ms: u64) -> Config {
    Config {
        provider: ProviderConfig {
            api_key: "test-key".to_string(),
            geocode_endpoint: format!("{}/geocode", server_uri),
            nearby_endpoint: format!("{}/nearby", server_uri),
            details_endpoint: format!("{}/details", server_uri),
            region: "jp".to_string(),
            language: "ja".to_string(),
        },
        search: SearchConfig {
            page_token_delay_ms,
            ..SearchConfig::default()
        },
        output: OutputConfig {
            csv_path: "./test_results.csv".to_string(),
            quota_path: "./test_quota.txt".to_string(),
            daily_search_limit: 15,
        },
    }
}

fn request(keyword: &str, place: &str, page_limit: u32) -> SearchRequest {
    SearchRequest {
        keyword: keyword.to_string(),
        place: place.to_string(),
        radius_m: 800,
        page_limit,
        place_type: Some("food".to_string()),
    }
}

fn geocode_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "results": [
            {"geometry": {"location": {"lat": 35.658034, "lng": 139.701636}}}
        ],
        "status": "OK"
    }))
}

#[tokio::test]
async fn test_full_pipeline_enriches_places() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(geocode_ok())
        .mount(&mock_server)
        .await;

    // One page, two places, no pagination token
    Mock::given(method("GET"))
        .and(path("/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"place_id": "cafe-1", "name": "Cafe One"},
                {"place_id": "bar-2", "name": "Bar Two"}
            ],
            "status": "OK"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details"))
        .and(query_param("placeid", "cafe-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "name": "Cafe One",
                "rating": 4.2,
                "formatted_phone_number": "03-1111-2222",
                "website": format!("{}/cafe-site", base_url)
            },
            "status": "OK"
        })))
        .mount(&mock_server)
        .await;

    // Second place has no website listed
    Mock::given(method("GET"))
        .and(path("/details"))
        .and(query_param("placeid", "bar-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"name": "Bar Two", "rating": 3.9},
            "status": "OK"
        })))
        .mount(&mock_server)
        .await;

    // The cafe website carries one profile link and one status permalink
    Mock::given(method("GET"))
        .and(path("/cafe-site"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <a href="https://www.instagram.com/cafe-one/">Follow us</a>
                <a href="https://twitter.com/cafe-one/status/99">Our latest tweet</a>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 10);
    let pipeline = Pipeline::new(&config).expect("Failed to build pipeline");
    let places = pipeline
        .run(&request("cafe", "Dogenzaka", 1))
        .await
        .expect("Pipeline run failed");

    assert_eq!(places.len(), 2);

    let cafe = &places[0];
    assert_eq!(cafe.place_id, "cafe-1");
    assert_eq!(
        cafe.map_url,
        "https://www.google.com/maps/place/?q=place_id:cafe-1"
    );
    let details = cafe.details.as_ref().expect("cafe should have details");
    assert_eq!(details.phone.as_deref(), Some("03-1111-2222"));

    // Profile link kept, status permalink excluded
    assert_eq!(cafe.social.len(), 1);
    assert!(cafe.social.contains("https://www.instagram.com/cafe-one/"));

    // No website means an empty social set, not an error
    let bar = &places[1];
    assert_eq!(bar.place_id, "bar-2");
    assert!(bar.details.is_some());
    assert!(bar.social.is_empty());
}

#[tokio::test]
async fn test_geocode_zero_results_fails_without_searching() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [], "status": "ZERO_RESULTS"})),
        )
        .mount(&mock_server)
        .await;

    // The nearby endpoint must never be contacted
    Mock::given(method("GET"))
        .and(path("/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 10);
    let pipeline = Pipeline::new(&config).expect("Failed to build pipeline");
    let result = pipeline.run(&request("cafe", "Nowhere Special", 3)).await;

    match result {
        Err(PlacelensError::PlaceNotFound { place }) => assert_eq!(place, "Nowhere Special"),
        other => panic!("Expected PlaceNotFound, got {:?}", other.map(|p| p.len())),
    }
}

#[tokio::test]
async fn test_page_limit_one_issues_single_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(geocode_ok())
        .mount(&mock_server)
        .await;

    // Token present, but page_limit=1 means it must not be followed
    Mock::given(method("GET"))
        .and(path("/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"place_id": "a1", "name": "Shop A"}],
            "next_page_token": "token-not-to-be-used",
            "status": "OK"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {}, "status": "OK"})),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 10);
    let pipeline = Pipeline::new(&config).expect("Failed to build pipeline");
    let places = pipeline
        .run(&request("cafe", "Dogenzaka", 1))
        .await
        .expect("Pipeline run failed");

    assert_eq!(places.len(), 1);
    // expect(1) on the nearby mock is verified when mock_server drops
}

#[tokio::test]
async fn test_pagination_follows_token_with_delay() {
    let mock_server = MockServer::start().await;
    let delay_ms: u64 = 300;

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(geocode_ok())
        .mount(&mock_server)
        .await;

    // Second page: matched by the pagetoken parameter, no further token
    Mock::given(method("GET"))
        .and(path("/nearby"))
        .and(query_param("pagetoken", "page-2-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"place_id": "b2", "name": "Shop B"}],
            "status": "OK"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // First page: keyword query, hands back the token
    Mock::given(method("GET"))
        .and(path("/nearby"))
        .and(query_param("keyword", "cafe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"place_id": "a1", "name": "Shop A"}],
            "next_page_token": "page-2-token",
            "status": "OK"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {}, "status": "OK"})),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), delay_ms);
    let pipeline = Pipeline::new(&config).expect("Failed to build pipeline");

    let start = Instant::now();
    let places = pipeline
        .run(&request("cafe", "Dogenzaka", 3))
        .await
        .expect("Pipeline run failed");
    let elapsed = start.elapsed();

    // Combined results in page order
    assert_eq!(places.len(), 2);
    assert_eq!(places[0].place_id, "a1");
    assert_eq!(places[1].place_id, "b2");

    // The token propagation delay must have elapsed before page two
    assert!(
        elapsed >= Duration::from_millis(delay_ms),
        "Expected at least {}ms between pages, whole run took {:?}",
        delay_ms,
        elapsed
    );
}

#[tokio::test]
async fn test_first_page_transport_error_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(geocode_ok())
        .mount(&mock_server)
        .await;

    // An unparseable first page is a transport-level failure; the whole
    // invocation aborts before any enrichment
    Mock::given(method("GET"))
        .and(path("/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {}, "status": "OK"})),
        )
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 10);
    let pipeline = Pipeline::new(&config).expect("Failed to build pipeline");
    let result = pipeline.run(&request("cafe", "Dogenzaka", 3)).await;

    assert!(matches!(result, Err(PlacelensError::Reqwest(_))));
}

#[tokio::test]
async fn test_later_page_error_returns_accumulated_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(geocode_ok())
        .mount(&mock_server)
        .await;

    // Page two fails to parse; pagination stops and page one's results
    // are still returned
    Mock::given(method("GET"))
        .and(path("/nearby"))
        .and(query_param("pagetoken", "page-2-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nearby"))
        .and(query_param("keyword", "cafe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"place_id": "a1", "name": "Shop A"}],
            "next_page_token": "page-2-token",
            "status": "OK"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {}, "status": "OK"})),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 10);
    let pipeline = Pipeline::new(&config).expect("Failed to build pipeline");
    let places = pipeline
        .run(&request("cafe", "Dogenzaka", 3))
        .await
        .expect("Pipeline run failed");

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].place_id, "a1");
}

#[tokio::test]
async fn test_empty_first_page_returns_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(geocode_ok())
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nearby"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [], "status": "ZERO_RESULTS"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // No stubs, so no details requests
    Mock::given(method("GET"))
        .and(path("/details"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {}, "status": "OK"})),
        )
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 10);
    let pipeline = Pipeline::new(&config).expect("Failed to build pipeline");
    let places = pipeline
        .run(&request("cafe", "Dogenzaka", 3))
        .await
        .expect("Pipeline run failed");

    assert!(places.is_empty());
}

#[tokio::test]
async fn test_detail_failure_degrades_per_item() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(geocode_ok())
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"place_id": "ok-1", "name": "Shop OK"},
                {"place_id": "broken-2", "name": "Shop Broken"},
                {"place_id": "ok-3", "name": "Shop Three"}
            ],
            "status": "OK"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details"))
        .and(query_param("placeid", "broken-2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    for id in ["ok-1", "ok-3"] {
        Mock::given(method("GET"))
            .and(path("/details"))
            .and(query_param("placeid", id))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"name": id, "website": format!("{}/site", base_url)},
                "status": "OK"
            })))
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/site"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><a href="https://www.facebook.com/shop">Facebook</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 10);
    let pipeline = Pipeline::new(&config).expect("Failed to build pipeline");
    let places = pipeline
        .run(&request("cafe", "Dogenzaka", 1))
        .await
        .expect("Pipeline run failed");

    // One failing item never shrinks the batch
    assert_eq!(places.len(), 3);
    assert_eq!(places[0].place_id, "ok-1");
    assert_eq!(places[1].place_id, "broken-2");
    assert_eq!(places[2].place_id, "ok-3");

    assert!(places[0].details.is_some());
    assert!(places[1].details.is_none());
    assert!(places[1].social.is_empty());
    assert!(places[2].social.contains("https://www.facebook.com/shop"));
}

#[tokio::test]
async fn test_website_that_is_a_profile_is_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(geocode_ok())
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"place_id": "a1", "name": "Shop A"}],
            "status": "OK"
        })))
        .mount(&mock_server)
        .await;

    // The listed website is recognized as a profile URL (it carries the
    // instagram. substring); it stays inside the mock server's URL space so
    // a broken short-circuit would hit the expect(0) mock below, not the
    // live internet
    let profile_url = format!("{}/instagram.page/shop-a/", base_url);
    Mock::given(method("GET"))
        .and(path("/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"name": "Shop A", "website": profile_url.clone()},
            "status": "OK"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/instagram.page/shop-a/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 10);
    let pipeline = Pipeline::new(&config).expect("Failed to build pipeline");
    let places = pipeline
        .run(&request("cafe", "Dogenzaka", 1))
        .await
        .expect("Pipeline run failed");

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].social.len(), 1);
    assert!(places[0].social.contains(&profile_url));
}
