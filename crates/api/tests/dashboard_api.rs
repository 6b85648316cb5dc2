//! Integration tests for the dashboard, sensor and batch read endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, put_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: the dashboard opens on the logistics view at the advanced tier
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_defaults_to_logistics_view_at_advanced_tier() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/dashboard").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["view"], "logistics");
    assert_eq!(data["tier"], "advanced");
    assert_eq!(data["tier_label"], "Advanced Tier");
    assert_eq!(data["simulation_running"], false);
    assert_eq!(data["batch"]["batch_id"], "SDR-M-042-2025");
}

#[tokio::test]
async fn logistics_panel_gates_enterprise_access_at_advanced_tier() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/dashboard/logistics").await).await;
    let panel = &json["data"];

    assert_eq!(panel["quality_prediction"]["status"], "unlocked");
    assert_eq!(panel["quality_prediction"]["content"]["risk_score"], 0);

    assert_eq!(panel["enterprise"]["status"], "locked");
    assert_eq!(
        panel["enterprise"]["content"]["message"],
        "Feature Locked: Requires Enterprise Tier Subscription"
    );

    assert_eq!(panel["live"]["container_temp"], 18.5);
    assert_eq!(panel["live"]["shock_warning"], false);
    assert_eq!(panel["traceability"]["record_id"], "AL-SIDR-DH/Record/00A9F");
    assert_eq!(panel["traceability"]["kezad_storage_temp"], 17.5);
}

#[tokio::test]
async fn enterprise_tier_unlocks_data_access_and_stream_labels() {
    let app = common::build_test_app();
    let response = put_json(
        app.clone(),
        "/api/v1/session/tier",
        json!({ "tier": "enterprise" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/api/v1/dashboard/logistics").await).await;
    let panel = &json["data"];

    assert_eq!(panel["enterprise"]["status"], "unlocked");
    assert_eq!(
        panel["enterprise"]["content"]["masked_api_key"],
        "************23BCDE7890"
    );

    let milestones = panel["traceability"]["milestones"].as_array().unwrap();
    assert!(milestones.iter().all(|m| m["stream_label"].is_string()));
}

// ---------------------------------------------------------------------------
// Test: farm panel carries live readings and yield analytics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn farm_panel_reports_live_readings_and_outlook() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/dashboard/farm").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let panel = &json["data"];
    assert_eq!(panel["live"]["soil_moisture"], 45.0);
    assert_eq!(panel["live"]["soil_moisture_alert"], false);
    assert_eq!(panel["live"]["light_intensity"], 65000);

    let analytics = &panel["analytics"];
    assert_eq!(analytics["status"], "unlocked");
    assert_eq!(analytics["content"]["outlook"]["yield_risk"], 10);
    assert_eq!(analytics["content"]["outlook"]["yield_forecast"], 85);
    assert_eq!(
        analytics["content"]["sustainability"]
            .as_array()
            .unwrap()
            .len(),
        3
    );
}

// ---------------------------------------------------------------------------
// Test: sensor snapshot before any tick
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sensors_endpoint_returns_initial_snapshot() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/sensors").await).await;
    let data = &json["data"];

    assert_eq!(data["sequence"], 0);
    assert_eq!(data["container_temp"], 18.5);
    assert_eq!(data["shock_index"], 0.1);
    assert_eq!(data["gps_location"], "28.52 N, -9.1 W (Mid-Voyage)");
    assert!(data["received_at"].is_string());
}

// ---------------------------------------------------------------------------
// Test: batch timeline and milestone lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_returns_metadata_and_six_milestones() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/batch").await).await;
    let data = &json["data"];

    assert_eq!(data["metadata"]["product"], "Medjool Dates (Morocco)");

    let timeline = data["timeline"].as_array().unwrap();
    assert_eq!(timeline.len(), 6);
    assert_eq!(timeline[0]["name"], "Harvest Complete");
    assert_eq!(timeline[3]["is_current"], true);
    assert_eq!(timeline[5]["is_last"], true);
    assert!(timeline[0]["stream_label"].is_null());
}

#[tokio::test]
async fn milestone_lookup_returns_entry() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/batch/milestones/1").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["data"]["name"], "Harvest Complete");
}

#[tokio::test]
async fn unknown_milestone_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/batch/milestones/42").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "TimelineMilestone with id 42 not found");
}
