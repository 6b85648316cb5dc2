//! Al Sidr dashboard engine.
//!
//! Owns the live state behind the dashboard:
//!
//! - [`SensorFeed`]: single-writer snapshot cell for the sensor record.
//! - [`SimulationClock`]: Running/Paused state machine that advances the
//!   feed on a fixed period through a scoped [`TickerHandle`](clock::TickerHandle).
//! - [`DashboardController`]: the one object consumers hold; owns tier,
//!   view, feed and clock and renders the dashboard view models.

pub mod clock;
pub mod config;
pub mod controller;
pub mod feed;

pub use clock::{ClockState, SimulationClock};
pub use config::SimulationConfig;
pub use controller::{ClockStatus, DashboardController, SessionState};
pub use feed::{SensorFeed, SensorSnapshot};
