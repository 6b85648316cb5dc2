//! Route definitions for the dashboard read models.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes mounted at `/dashboard`.
///
/// ```text
/// GET  /            -> get_dashboard
/// GET  /farm        -> get_farm_panel
/// GET  /logistics   -> get_logistics_panel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::get_dashboard))
        .route("/farm", get(dashboard::get_farm_panel))
        .route("/logistics", get(dashboard::get_logistics_panel))
}

/// Batch record routes mounted at `/batch`.
///
/// ```text
/// GET  /                  -> get_batch
/// GET  /milestones/{id}   -> get_milestone
/// ```
pub fn batch_router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::get_batch))
        .route("/milestones/{id}", get(dashboard::get_milestone))
}
