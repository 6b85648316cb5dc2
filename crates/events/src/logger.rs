//! Structured log sink for dashboard events.
//!
//! [`EventLogger`] subscribes to the [`EventBus`](crate::bus::EventBus) and
//! writes every event to the tracing pipeline. Nothing is persisted; the log
//! is the only record of what happened during a session.

use tokio::sync::broadcast;

use crate::bus::DashboardEvent;

/// Background service that logs dashboard events.
pub struct EventLogger;

impl EventLogger {
    /// Run the logging loop.
    ///
    /// Exits when the channel is closed (i.e. the bus is dropped). Returns the
    /// number of events observed.
    pub async fn run(mut receiver: broadcast::Receiver<DashboardEvent>) -> u64 {
        let mut seen = 0u64;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    seen += 1;
                    Self::log(&event);
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(seen, "Event bus closed, event logger shutting down");
                    break;
                }
            }
        }
        seen
    }

    fn log(event: &DashboardEvent) {
        if event.kind.is_periodic() {
            tracing::debug!(
                event_id = %event.id,
                kind = %event.kind,
                payload = %event.payload,
                "Dashboard event"
            );
        } else {
            tracing::info!(
                event_id = %event.id,
                kind = %event.kind,
                payload = %event.payload,
                "Dashboard event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsidr_core::tier::Tier;
    use serde_json::json;

    use crate::bus::{EventBus, EventKind};

    #[tokio::test]
    async fn logger_drains_until_bus_is_dropped() {
        let bus = EventBus::default();
        let handle = tokio::spawn(EventLogger::run(bus.subscribe()));

        bus.publish(DashboardEvent::tier_changed(Tier::Advanced, Tier::Basic));
        bus.publish(DashboardEvent::new(
            EventKind::SensorUpdated,
            json!({ "sequence": 1 }),
        ));
        drop(bus);

        let seen = handle.await.expect("logger task should not panic");
        assert_eq!(seen, 2);
    }
}
