#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use alsidr_api::config::ServerConfig;
use alsidr_api::router::build_app_router;
use alsidr_api::state::AppState;
use alsidr_engine::{DashboardController, SimulationConfig};
use alsidr_events::EventBus;

/// Build a test `ServerConfig` with safe defaults.
///
/// The simulation clock starts paused with a fixed seed so responses only
/// change when a test asks them to.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        simulation: SimulationConfig {
            tick_period: Duration::from_secs(5),
            autostart: false,
            seed: Some(7),
            ..SimulationConfig::default()
        },
    }
}

/// Build the full application router with all middleware layers.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack. Clones of the returned router share one controller.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

/// Like [`build_test_app`], with a caller-supplied configuration.
pub fn build_test_app_with(config: ServerConfig) -> Router {
    let event_bus = Arc::new(EventBus::default());
    let controller = DashboardController::new(config.simulation.clone(), Arc::clone(&event_bus))
        .expect("controller should build from test config");

    let state = AppState {
        config: Arc::new(config.clone()),
        controller: Arc::new(controller),
        event_bus,
    };

    build_app_router(state, &config).expect("test CORS origins are valid")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
