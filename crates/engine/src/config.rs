use std::time::Duration;

use alsidr_core::sensor::SensorReading;
use alsidr_core::tier::Tier;

/// Default interval between simulated sensor updates.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(5);

/// Settings for the dashboard controller and its simulation clock.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Interval between sensor updates while the clock is running.
    pub tick_period: Duration,
    /// Start the clock immediately (the dashboard opens in the running state).
    pub autostart: bool,
    /// Fixed RNG seed for reproducible jitter. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Tier selected when the dashboard opens.
    pub initial_tier: Tier,
    /// Reading the feed starts from.
    pub initial_reading: SensorReading,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            autostart: true,
            seed: None,
            initial_tier: Tier::default(),
            initial_reading: SensorReading::default(),
        }
    }
}
