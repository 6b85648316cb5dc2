//! Handlers for the dashboard read models.
//!
//! Every response is computed from the controller's current snapshot and
//! tier; gated regions come back as `{"status": "locked", ...}` rather than
//! being left out.

use alsidr_core::timeline::{BatchMetadata, MilestoneView};
use alsidr_core::types::MilestoneId;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Batch metadata plus the timeline as seen at the current tier.
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub metadata: BatchMetadata,
    pub timeline: Vec<MilestoneView>,
}

/// GET /api/v1/dashboard
///
/// Header plus whichever panel the active view selects.
pub async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.controller.render(),
    })
}

/// GET /api/v1/dashboard/farm
pub async fn get_farm_panel(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.controller.render_farm(),
    })
}

/// GET /api/v1/dashboard/logistics
pub async fn get_logistics_panel(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.controller.render_logistics(),
    })
}

/// GET /api/v1/sensors
///
/// The raw sensor snapshot, refreshed on every clock tick.
pub async fn get_sensors(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.controller.snapshot(),
    })
}

/// GET /api/v1/batch
pub async fn get_batch(State(state): State<AppState>) -> impl IntoResponse {
    let batch = state.controller.batch();
    Json(DataResponse {
        data: BatchResponse {
            metadata: batch.metadata.clone(),
            timeline: batch.timeline_view(state.controller.tier()),
        },
    })
}

/// GET /api/v1/batch/milestones/{id}
pub async fn get_milestone(
    State(state): State<AppState>,
    Path(id): Path<MilestoneId>,
) -> AppResult<impl IntoResponse> {
    let milestone = state.controller.batch().milestone(id)?;
    Ok(Json(DataResponse {
        data: milestone.clone(),
    }))
}
