use std::sync::Arc;

use alsidr_engine::DashboardController;
use alsidr_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Owner of tier, view, sensor feed and simulation clock.
    pub controller: Arc<DashboardController>,
    /// Event bus the controller publishes to.
    pub event_bus: Arc<EventBus>,
}
