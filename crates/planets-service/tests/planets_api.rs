//! End-to-end tests for the planets API over an in-memory store.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use planets_lib::{MemoryStore, PlanetService};
use planets_service::router;
use planets_service_shared::{AppState, HttpMetrics, MetricsConfig};
use serde_json::{json, Value};

const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn app() -> (TestServer, HttpMetrics) {
    let metrics = HttpMetrics::new(&MetricsConfig::default());
    let service = PlanetService::new(Arc::new(MemoryStore::new()));
    let state = AppState::new(Arc::new(service), metrics.clone());
    let server = TestServer::new(router(state)).expect("failed to create test server");
    (server, metrics)
}

#[tokio::test]
async fn planet_lifecycle() {
    let (server, _) = app();

    let created = server
        .post("/v1/planets")
        .json(&json!({"name": "Mars"}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let created: Value = created.json();
    assert_eq!(created["name"], "Mars");
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

    let fetched = server.get(&format!("/v1/planets/{id}")).await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    assert_eq!(fetched.json::<Value>(), json!({"id": id, "name": "Mars"}));

    let updated = server
        .put(&format!("/v1/planets/{id}"))
        .json(&json!({"name": "New Mars"}))
        .await;
    assert_eq!(updated.status_code(), StatusCode::NO_CONTENT);
    assert!(updated.as_bytes().is_empty());

    let fetched = server.get(&format!("/v1/planets/{id}")).await;
    assert_eq!(fetched.json::<Value>()["name"], "New Mars");
}

#[tokio::test]
async fn repeated_identical_update_succeeds() {
    let (server, _) = app();
    let created: Value = server
        .post("/v1/planets")
        .json(&json!({"name": "Venus"}))
        .await
        .json();
    let uri = format!("/v1/planets/{}", created["id"].as_str().unwrap());

    for _ in 0..2 {
        let response = server.put(&uri).json(&json!({"name": "Venus"})).await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn unknown_planet_is_not_found() {
    let (server, _) = app();

    let response = server.get("/v1/planets/5f165e2e4de9b442e60b3905").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({"error_code": "WA:003", "message": "planet not found"})
    );

    let response = server.get("/v1/planets/not-an-object-id").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_unknown_planet_is_not_found() {
    let (server, _) = app();

    let response = server
        .put("/v1/planets/5f165e2e4de9b442e60b3905")
        .json(&json!({"name": "Pluto"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error_code"], "WA:003");
}

#[tokio::test]
async fn payload_errors() {
    let (server, _) = app();

    let response = server.post("/v1/planets").text(r#"{: "Mars"}"#).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error_code"], "WA:007");

    let response = server
        .post("/v1/planets")
        .json(&json!({"test": "Mars"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "error_code": "WA:001",
            "message": "payload is invalid",
            "details": [{
                "name": "Name",
                "reason": "Field validation for 'Name' failed on the 'required' tag"
            }]
        })
    );
}

#[tokio::test]
async fn array_body_is_rejected_and_nothing_is_stored() {
    let store = Arc::new(MemoryStore::new());
    let service = PlanetService::new(store.clone());
    let state = AppState::new(
        Arc::new(service),
        HttpMetrics::new(&MetricsConfig::default()),
    );
    let server = TestServer::new(router(state)).expect("failed to create test server");

    for body in [r#"["Mars"]"#, "[]", r#""Mars""#] {
        let response = server.post("/v1/planets").text(body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.json::<Value>()["error_code"], "WA:007", "{body}");
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let (server, _) = app();

    let response = server
        .get("/health")
        .add_header(X_REQUEST_ID, HeaderValue::from_static("abc123"))
        .await;
    assert_eq!(response.headers().get(X_REQUEST_ID).unwrap(), "abc123");

    let response = server.get("/health").await;
    let generated = response.headers().get(X_REQUEST_ID).unwrap();
    assert_eq!(generated.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn metrics_endpoint_reports_route_templates() {
    let (server, metrics) = app();

    server.get("/v1/planets/5f165e2e4de9b442e60b3905").await;
    server.get("/v1/planets/5f165e2e4de9b442e60b3906").await;

    let response = server.get("/metrics").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let text = response.text();

    let line = text
        .lines()
        .find(|l| l.starts_with("http_requests_total{") && l.contains("code=\"404\""))
        .expect("404 counter present");
    assert!(line.contains("path=\"/v1/planets/{id}\""), "{line}");
    assert!(line.contains("method=\"get\""), "{line}");
    assert!(line.ends_with(" 2"), "{line}");
    assert!(!text.contains("5f165e2e4de9b442e60b3905"));

    assert!(metrics.render().contains("environment=\"local\""));
}
