pub mod dashboard;
pub mod health;
pub mod session;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dashboard                       header + active panel
/// /dashboard/farm                  farm panel
/// /dashboard/logistics             logistics panel
///
/// /sensors                         raw sensor snapshot
///
/// /batch                           batch metadata + timeline
/// /batch/milestones/{id}           single milestone
///
/// /session                         tier, view, simulation state
/// /session/tier                    select tier (PUT)
/// /session/view                    select view (PUT)
///
/// /simulation/toggle               pause / resume the data feed (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/dashboard", dashboard::router())
        .route("/sensors", get(handlers::dashboard::get_sensors))
        .nest("/batch", dashboard::batch_router())
        .nest("/session", session::router())
        .nest("/simulation", session::simulation_router())
}
