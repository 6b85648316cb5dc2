//! Dashboard change notifications over a `tokio::sync::broadcast` channel.
//!
//! The controller and the simulation clock publish a [`DashboardEvent`] for
//! every state change; any number of subscribers (the event logger, tests)
//! observe them. Share the bus as `Arc<EventBus>`.

use std::fmt;

use alsidr_core::dashboard::DashboardView;
use alsidr_core::tier::Tier;
use alsidr_core::types::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events buffered per subscriber before the slowest one starts lagging.
pub const DEFAULT_CAPACITY: usize = 256;

/// What changed. Serialized with its dotted wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// The simulation clock replaced the sensor record.
    #[serde(rename = "sensor.updated")]
    SensorUpdated,
    #[serde(rename = "tier.changed")]
    TierChanged,
    #[serde(rename = "view.changed")]
    ViewChanged,
    /// The simulation clock was paused or resumed.
    #[serde(rename = "simulation.toggled")]
    SimulationToggled,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::SensorUpdated => "sensor.updated",
            EventKind::TierChanged => "tier.changed",
            EventKind::ViewChanged => "view.changed",
            EventKind::SimulationToggled => "simulation.toggled",
        }
    }

    /// High-frequency kinds, logged below the default level.
    pub fn is_periodic(self) -> bool {
        self == EventKind::SensorUpdated
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardEvent {
    /// UUIDv7, so ids sort by creation time.
    pub id: Uuid,
    pub kind: EventKind,
    pub payload: serde_json::Value,
    pub occurred_at: Timestamp,
}

impl DashboardEvent {
    pub fn new(kind: EventKind, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
            payload,
            occurred_at: Utc::now(),
        }
    }

    pub fn tier_changed(from: Tier, to: Tier) -> Self {
        Self::new(EventKind::TierChanged, json!({ "from": from, "to": to }))
    }

    pub fn view_changed(from: DashboardView, to: DashboardView) -> Self {
        Self::new(EventKind::ViewChanged, json!({ "from": from, "to": to }))
    }
}

pub struct EventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    /// A bus whose subscribers each buffer up to `capacity` events.
    /// Subscribers that fall further behind see `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Fan the event out; returns how many subscribers it reached.
    ///
    /// Publishing with nobody listening is not an error.
    pub fn publish(&self, event: DashboardEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
