//! Shipping fee resolution tests.
//!
//! Uses `wiremock` to stand up the carrier's destination-search endpoint and
//! fee-table page locally, and actix's test harness for the HTTP contract,
//! so no real network traffic is made.

use actix_web::{test, web, App};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tokoscrape::api;
use tokoscrape::app_state::AppState;
use tokoscrape::config::Config;
use tokoscrape::http_client::{HttpClientConfig, RetryingHttpClient};
use tokoscrape::metrics::MetricsTracker;
use tokoscrape::models::ShippingOption;
use tokoscrape::sources::jne;

const FEE_PAGE: &str = r#"
    <html><body>
    <table class="tariff-table">
        <thead><tr><th>Service</th><th>Tariff</th><th>ETD</th></tr></thead>
        <tbody>
            <tr><td>REG</td><td>Rp18.000</td><td>2-3 hari</td></tr>
            <tr><td>YES</td><td>Rp32.000</td><td>1 hari</td></tr>
        </tbody>
    </table>
    </body></html>
"#;

/// Client with retries disabled so failure tests stay fast.
fn test_client() -> RetryingHttpClient {
    RetryingHttpClient::with_config(HttpClientConfig {
        max_retries: 0,
        ..HttpClientConfig::default()
    })
    .expect("failed to build test client")
}

fn test_state(carrier_base_url: &str) -> web::Data<AppState> {
    let mut config = Config::default();
    config.shipping.base_url = carrier_base_url.to_string();
    config.http.max_retries = 0;

    web::Data::new(AppState {
        http_client: test_client(),
        metrics: MetricsTracker::new(),
        config,
    })
}

#[tokio::test]
async fn destination_lookup_takes_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/destination/search"))
        .and(query_param("keyword", "Yogyakarta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "code": "YOG10000", "label": "Yogyakarta, D.I. Yogyakarta" },
                { "code": "YOG10200", "label": "Yogyakarta Selatan" }
            ]
        })))
        .mount(&server)
        .await;

    let code = jne::lookup_destination_code(&test_client(), &server.uri(), "Yogyakarta").await;
    assert_eq!(code.as_deref(), Some("YOG10000"));
}

#[tokio::test]
async fn destination_lookup_handles_empty_and_error_responses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/destination/search"))
        .and(query_param("keyword", "Atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/id/destination/search"))
        .and(query_param("keyword", "Broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client();
    assert_eq!(
        jne::lookup_destination_code(&client, &server.uri(), "Atlantis").await,
        None
    );
    assert_eq!(
        jne::lookup_destination_code(&client, &server.uri(), "Broken").await,
        None
    );
}

#[tokio::test]
async fn fee_fetch_parses_table_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/shipping-fee"))
        .and(query_param("origin", "CGK10000"))
        .and(query_param("destination", "YOG10000"))
        .and(query_param("weight", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEE_PAGE))
        .mount(&server)
        .await;

    let options =
        jne::fetch_shipping_options(&test_client(), &server.uri(), "CGK10000", "YOG10000", 2)
            .await
            .unwrap();

    assert_eq!(
        options,
        vec![
            ShippingOption { service: "REG".into(), price: 18_000, etd: "2-3 hari".into() },
            ShippingOption { service: "YES".into(), price: 32_000, etd: "1 hari".into() },
        ]
    );
}

#[tokio::test]
async fn fee_fetch_maps_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/shipping-fee"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result =
        jne::fetch_shipping_options(&test_client(), &server.uri(), "CGK10000", "YOG10000", 1)
            .await;
    assert!(result.is_err());
}

#[actix_web::test]
async fn shipping_endpoint_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/destination/search"))
        .and(query_param("keyword", "Yogyakarta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "code": "YOG10000", "label": "Yogyakarta" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/id/shipping-fee"))
        .and(query_param("destination", "YOG10000"))
        .and(query_param("weight", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEE_PAGE))
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(test_state(&server.uri()))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/shipping/fee?address=Jl.%20Mawar%20I%2F207%2C%20Kota%20Yogyakarta%2C%20D.I.%20Yogyakarta%2055281&weight=3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let options: Vec<ShippingOption> = test::read_body_json(resp).await;
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].service, "REG");
}

#[actix_web::test]
async fn missing_weight_is_rejected_before_any_lookup() {
    let server = MockServer::start().await;

    // The heuristic and lookup must never run when validation fails.
    Mock::given(method("GET"))
        .and(path("/id/destination/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(test_state(&server.uri()))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/shipping/fee?address=Kota%20Bandung")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("weight"));
}

#[actix_web::test]
async fn unresolvable_city_is_a_bad_request() {
    let server = MockServer::start().await;
    let app = test::init_service(
        App::new()
            .app_data(test_state(&server.uri()))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/shipping/fee?address=Jl.%20Tanpa%20Nama%2C%20Indonesia&weight=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    // The error message carries the address the guess was made from.
    assert!(body["error"].as_str().unwrap().contains("Jl. Tanpa Nama"));
}

#[actix_web::test]
async fn unknown_destination_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/destination/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(test_state(&server.uri()))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/shipping/fee?address=Jl.%20A%2C%20Kota%20Bandung&weight=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Bandung"));
}

#[actix_web::test]
async fn missing_product_url_is_rejected() {
    let server = MockServer::start().await;
    let app = test::init_service(
        App::new()
            .app_data(test_state(&server.uri()))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/product-details").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("url"));
}

#[actix_web::test]
async fn metrics_track_shipping_outcomes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/destination/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let state = test_state(&server.uri());
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/shipping/fee?address=Jl.%20A%2C%20Kota%20Bandung&weight=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let snapshot = state.metrics.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].pipeline, "shipping");
    assert_eq!(snapshot[0].failed_requests, 1);
}
