//! Simulation clock: periodically replaces the sensor record.
//!
//! The clock has two states. While [`ClockState::Running`] it owns a
//! [`TickerHandle`], a spawned tokio task that advances the [`SensorFeed`]
//! once per tick period. Leaving the running state releases the handle; the
//! handle also cancels its task when dropped, so a ticker can never outlive
//! the clock that started it.

use std::sync::Arc;
use std::time::Duration;

use alsidr_events::bus::{DashboardEvent, EventBus, EventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::SimulationConfig;
use crate::feed::SensorFeed;

// ---------------------------------------------------------------------------
// ClockState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    Running,
    Paused,
}

impl ClockState {
    pub fn is_running(self) -> bool {
        self == ClockState::Running
    }
}

// ---------------------------------------------------------------------------
// TickerHandle
// ---------------------------------------------------------------------------

/// Ownership of a running ticker task.
///
/// [`release`](TickerHandle::release) consumes the handle, so it can only be
/// released once. Dropping an unreleased handle cancels the task as well.
pub struct TickerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    fn spawn(feed: Arc<SensorFeed>, bus: Arc<EventBus>, period: Duration, rng: StdRng) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_ticker(feed, bus, period, rng, cancel.clone()));
        Self {
            cancel,
            task: Some(task),
        }
    }

    /// Cancel the ticker and wait for its task to finish.
    pub async fn release(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Simulation ticker task failed");
            }
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Advance the feed once per `period` until `cancel` fires.
///
/// The first update happens one full period after start.
async fn run_ticker(
    feed: Arc<SensorFeed>,
    bus: Arc<EventBus>,
    period: Duration,
    mut rng: StdRng,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::debug!(period_ms = period.as_millis() as u64, "Simulation ticker started");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Simulation ticker cancelled");
                break;
            }
            _ = interval.tick() => {
                let snapshot = feed.advance(&mut rng);
                tracing::debug!(
                    sequence = snapshot.sequence,
                    container_temp = snapshot.reading.container_temp,
                    soil_moisture = snapshot.reading.soil_moisture,
                    "Sensor record advanced"
                );
                bus.publish(DashboardEvent::new(
                    EventKind::SensorUpdated,
                    serde_json::json!({
                        "sequence": snapshot.sequence,
                        "container_temp": snapshot.reading.container_temp,
                        "shock_index": snapshot.reading.shock_index,
                        "soil_moisture": snapshot.reading.soil_moisture,
                    }),
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SimulationClock
// ---------------------------------------------------------------------------

/// Running/Paused state machine driving the sensor feed.
pub struct SimulationClock {
    feed: Arc<SensorFeed>,
    bus: Arc<EventBus>,
    period: Duration,
    seed: Option<u64>,
    /// How many tickers have been started; mixed into a fixed seed so every
    /// resume continues with fresh but reproducible jitter.
    starts: u64,
    ticker: Option<TickerHandle>,
    /// Set by [`shutdown`](SimulationClock::shutdown); a closed clock never
    /// starts again.
    closed: bool,
}

impl SimulationClock {
    /// Create a paused clock.
    pub fn new(feed: Arc<SensorFeed>, bus: Arc<EventBus>, config: &SimulationConfig) -> Self {
        Self {
            feed,
            bus,
            period: config.tick_period,
            seed: config.seed,
            starts: 0,
            ticker: None,
            closed: false,
        }
    }

    pub fn state(&self) -> ClockState {
        if self.ticker.is_some() {
            ClockState::Running
        } else {
            ClockState::Paused
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Enter the running state. A no-op when already running, and after
    /// [`shutdown`](SimulationClock::shutdown), where it stays paused.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> ClockState {
        if self.closed {
            tracing::warn!("Simulation clock is shut down, not starting");
            return ClockState::Paused;
        }
        if self.ticker.is_none() {
            let rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.starts)),
                None => StdRng::from_os_rng(),
            };
            self.starts += 1;
            self.ticker = Some(TickerHandle::spawn(
                Arc::clone(&self.feed),
                Arc::clone(&self.bus),
                self.period,
                rng,
            ));
            tracing::info!(starts = self.starts, "Simulation clock running");
        }
        ClockState::Running
    }

    /// Enter the paused state, releasing the ticker. A no-op when paused.
    pub async fn pause(&mut self) -> ClockState {
        if let Some(ticker) = self.ticker.take() {
            ticker.release().await;
            tracing::info!("Simulation clock paused");
        }
        ClockState::Paused
    }

    /// Flip between running and paused; returns the new state.
    pub async fn toggle(&mut self) -> ClockState {
        match self.state() {
            ClockState::Running => self.pause().await,
            ClockState::Paused => self.start(),
        }
    }

    /// Release the ticker for good. Later starts and toggles leave the clock
    /// paused.
    pub async fn shutdown(&mut self) {
        self.closed = true;
        self.pause().await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
