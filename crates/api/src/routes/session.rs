use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Session routes mounted at `/session`.
///
/// ```text
/// GET  /       -> get_session
/// PUT  /tier   -> set_tier
/// PUT  /view   -> set_view
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(session::get_session))
        .route("/tier", put(session::set_tier))
        .route("/view", put(session::set_view))
}

/// Simulation control routes mounted at `/simulation`.
///
/// ```text
/// POST /toggle -> toggle_simulation
/// ```
pub fn simulation_router() -> Router<AppState> {
    Router::new().route("/toggle", post(session::toggle_simulation))
}
