//! Liveness of the service and of the simulated sensor feed.

use alsidr_core::types::Timestamp;
use alsidr_engine::ClockState;
use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// A running feed that has missed this many tick periods is reported as
/// degraded. Time spent paused does not count.
const STALE_AFTER_TICKS: u32 = 3;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when a running feed has stopped advancing.
    pub status: &'static str,
    pub version: &'static str,
    pub simulation: ClockState,
    pub sensor_sequence: u64,
    pub last_reading_at: Timestamp,
    pub event_subscribers: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let clock = state.controller.clock_status();
    let snapshot = state.controller.snapshot();

    let stale_after = state.config.simulation.tick_period * STALE_AFTER_TICKS;
    let last_activity = snapshot.received_at.max(clock.since);
    let age = (Utc::now() - last_activity).to_std().unwrap_or_default();
    let status = if clock.state.is_running() && age > stale_after {
        tracing::warn!(
            age_ms = age.as_millis() as u64,
            sequence = snapshot.sequence,
            "Sensor feed is running but has not advanced"
        );
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        simulation: clock.state,
        sensor_sequence: snapshot.sequence,
        last_reading_at: snapshot.received_at,
        event_subscribers: state.event_bus.subscriber_count(),
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
