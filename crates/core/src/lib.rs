//! Al Sidr dashboard domain logic.
//!
//! Pure, synchronous building blocks shared by the simulation engine and the
//! API: the sensor record and its update rules, derived metrics, the tier
//! gate, the static batch timeline, and the composed dashboard view models.

pub mod dashboard;
pub mod error;
pub mod esg;
pub mod metrics;
pub mod sensor;
pub mod tier;
pub mod timeline;
pub mod types;
