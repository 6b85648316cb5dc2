//! Handlers for the viewer session: tier selection, active view, and the
//! simulation toggle.

use alsidr_core::dashboard::DashboardView;
use alsidr_core::tier::Tier;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetTierRequest {
    /// `basic`, `advanced` or `enterprise` (case-insensitive).
    pub tier: String,
}

#[derive(Debug, Deserialize)]
pub struct SetViewRequest {
    /// `farm` or `logistics` (case-insensitive).
    pub view: String,
}

/// GET /api/v1/session
pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.controller.session(),
    })
}

/// PUT /api/v1/session/tier
///
/// A malformed body is a 400 `BAD_REQUEST`; an unknown tier name is a 400
/// `VALIDATION_ERROR`. Either way the current tier is kept.
pub async fn set_tier(
    State(state): State<AppState>,
    body: Result<Json<SetTierRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    let tier: Tier = input.tier.parse()?;
    state.controller.set_tier(tier);

    Ok(Json(DataResponse {
        data: state.controller.session(),
    }))
}

/// PUT /api/v1/session/view
pub async fn set_view(
    State(state): State<AppState>,
    body: Result<Json<SetViewRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    let view: DashboardView = input.view.parse()?;
    state.controller.set_view(view);

    Ok(Json(DataResponse {
        data: state.controller.session(),
    }))
}

/// POST /api/v1/simulation/toggle
///
/// Pause the data feed if it is running, resume it if it is paused.
pub async fn toggle_simulation(State(state): State<AppState>) -> impl IntoResponse {
    let simulation = state.controller.toggle_simulation().await;
    tracing::info!(?simulation, "Simulation toggled");

    Json(DataResponse {
        data: state.controller.session(),
    })
}
