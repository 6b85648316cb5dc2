//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, post};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["simulation"], "paused");
    assert_eq!(json["sensor_sequence"], 0);
    assert!(json["last_reading_at"].is_string());
    assert!(json["event_subscribers"].is_number());
}

// ---------------------------------------------------------------------------
// Test: Resuming after a long pause is not reported as a stale feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_is_ok_right_after_resuming_a_long_pause() {
    let mut config = common::test_config();
    config.simulation.tick_period = Duration::from_millis(200);
    let app = common::build_test_app_with(config);

    // Paused for longer than three tick periods, in wall-clock time.
    tokio::time::sleep(Duration::from_millis(700)).await;

    let response = post(app.clone(), "/api/v1/simulation/toggle").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["simulation"], "running");
    assert_eq!(json["status"], "ok");
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a valid UUID (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: Simple cross-origin GET carries both CORS and request id headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cross_origin_get_passes_through_every_layer() {
    let app = common::build_test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/session")
        .header("Origin", "http://localhost:5173")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-me");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let app = common::build_test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/session/tier")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
}
