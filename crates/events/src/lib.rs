//! Al Sidr dashboard event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DashboardEvent`] and [`EventKind`]: what changed, with a JSON payload.
//! - [`EventLogger`]: background subscriber that writes events to the log.

pub mod bus;
pub mod logger;

pub use bus::{DashboardEvent, EventBus, EventKind};
pub use logger::EventLogger;
