//! The dashboard controller: single owner of all mutable dashboard state.
//!
//! Consumers receive an `Arc<DashboardController>` and go through it for
//! every read and every command; there is no ambient global state.

use std::fmt;
use std::sync::Arc;

use alsidr_core::dashboard::{
    dashboard_page, farm_panel, logistics_panel, ActivePanel, DashboardPage, DashboardView,
    FarmPanel, LogisticsPanel, PageContext,
};
use alsidr_core::error::CoreError;
use alsidr_core::tier::Tier;
use alsidr_core::timeline::BatchRecord;
use alsidr_core::types::Timestamp;
use alsidr_events::bus::{DashboardEvent, EventBus, EventKind};
use chrono::Utc;
use serde::Serialize;
use tokio::sync::{watch, Mutex};

use crate::clock::{ClockState, SimulationClock};
use crate::config::SimulationConfig;
use crate::feed::{SensorFeed, SensorSnapshot};

/// Tier, view and clock state as seen by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub tier: Tier,
    pub view: DashboardView,
    pub simulation: ClockState,
}

/// The clock's state and when it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStatus {
    pub state: ClockState,
    pub since: Timestamp,
}

pub struct DashboardController {
    feed: Arc<SensorFeed>,
    batch: BatchRecord,
    tier: watch::Sender<Tier>,
    view: watch::Sender<DashboardView>,
    /// Mirrors the clock's state so reads never wait on the clock mutex.
    clock_status: watch::Sender<ClockStatus>,
    clock: Mutex<SimulationClock>,
    bus: Arc<EventBus>,
}

impl DashboardController {
    /// Build the controller and, when configured, start the clock.
    ///
    /// The initial reading is validated since it may come from configuration
    /// rather than the simulator. Must be called from within a tokio runtime.
    pub fn new(config: SimulationConfig, bus: Arc<EventBus>) -> Result<Self, CoreError> {
        config.initial_reading.validate()?;
        let batch = BatchRecord::load()?;

        let feed = Arc::new(SensorFeed::new(config.initial_reading.clone()));
        let mut clock = SimulationClock::new(Arc::clone(&feed), Arc::clone(&bus), &config);
        if config.autostart {
            clock.start();
        }

        let (tier, _) = watch::channel(config.initial_tier);
        let (view, _) = watch::channel(DashboardView::default());
        let (clock_status, _) = watch::channel(ClockStatus {
            state: clock.state(),
            since: Utc::now(),
        });

        tracing::info!(
            tier = %config.initial_tier,
            simulation = ?clock.state(),
            batch_id = batch.metadata.batch_id,
            "Dashboard controller ready"
        );

        Ok(Self {
            feed,
            batch,
            tier,
            view,
            clock_status,
            clock: Mutex::new(clock),
            bus,
        })
    }

    // -- Sensor feed --

    pub fn snapshot(&self) -> SensorSnapshot {
        self.feed.snapshot()
    }

    pub fn subscribe_sensors(&self) -> watch::Receiver<SensorSnapshot> {
        self.feed.subscribe()
    }

    // -- Tier --

    pub fn tier(&self) -> Tier {
        *self.tier.borrow()
    }

    /// Select a tier. Every tier is always a legal choice.
    pub fn set_tier(&self, tier: Tier) {
        let previous = self.tier.send_replace(tier);
        if previous != tier {
            tracing::info!(from = %previous, to = %tier, "Tier changed");
        }
        self.bus.publish(DashboardEvent::tier_changed(previous, tier));
    }

    // -- View --

    pub fn view(&self) -> DashboardView {
        *self.view.borrow()
    }

    pub fn set_view(&self, view: DashboardView) {
        let previous = self.view.send_replace(view);
        if previous != view {
            tracing::info!(from = %previous, to = %view, "Dashboard view changed");
        }
        self.bus.publish(DashboardEvent::view_changed(previous, view));
    }

    // -- Simulation --

    pub fn simulation_state(&self) -> ClockState {
        self.clock_status.borrow().state
    }

    pub fn clock_status(&self) -> ClockStatus {
        *self.clock_status.borrow()
    }

    /// Record `state`, restamping `since` only when the state changes.
    fn record_clock_state(&self, state: ClockState) {
        self.clock_status.send_if_modified(|status| {
            if status.state == state {
                return false;
            }
            *status = ClockStatus {
                state,
                since: Utc::now(),
            };
            true
        });
    }

    /// Pause a running clock or resume a paused one; returns the new state.
    ///
    /// After [`shutdown`](Self::shutdown) the clock stays paused.
    pub async fn toggle_simulation(&self) -> ClockState {
        let mut clock = self.clock.lock().await;
        let state = clock.toggle().await;
        self.record_clock_state(state);
        drop(clock);

        self.bus.publish(DashboardEvent::new(
            EventKind::SimulationToggled,
            serde_json::json!({ "state": state }),
        ));
        state
    }

    /// Release the clock. Safe to call more than once.
    pub async fn shutdown(&self) {
        let mut clock = self.clock.lock().await;
        clock.shutdown().await;
        self.record_clock_state(clock.state());
        tracing::info!("Dashboard controller shut down");
    }

    // -- Read models --

    pub fn session(&self) -> SessionState {
        SessionState {
            tier: self.tier(),
            view: self.view(),
            simulation: self.simulation_state(),
        }
    }

    pub fn batch(&self) -> &BatchRecord {
        &self.batch
    }

    /// The header plus whichever panel the active view selects.
    pub fn render(&self) -> DashboardPage {
        let snapshot = self.snapshot();
        dashboard_page(PageContext {
            reading: &snapshot.reading,
            batch: &self.batch,
            tier: self.tier(),
            view: self.view(),
            simulation_running: self.simulation_state().is_running(),
            received_at: snapshot.received_at,
        })
    }

    /// One panel for the current tier, regardless of the active view.
    pub fn render_view(&self, view: DashboardView) -> ActivePanel {
        match view {
            DashboardView::Farm => ActivePanel::Farm(self.render_farm()),
            DashboardView::Logistics => ActivePanel::Logistics(self.render_logistics()),
        }
    }

    pub fn render_farm(&self) -> FarmPanel {
        let snapshot = self.snapshot();
        farm_panel(&snapshot.reading, self.tier(), snapshot.received_at)
    }

    pub fn render_logistics(&self) -> LogisticsPanel {
        logistics_panel(&self.snapshot().reading, self.tier(), &self.batch)
    }
}

impl fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardController")
            .field("tier", &self.tier())
            .field("view", &self.view())
            .field("clock", &self.clock_status())
            .field("sensor_sequence", &self.feed.snapshot().sequence)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
