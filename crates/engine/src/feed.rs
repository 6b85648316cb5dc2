//! Single-writer snapshot cell for the sensor record.
//!
//! [`SensorFeed`] wraps a `tokio::sync::watch` channel. Writers replace the
//! whole [`SensorSnapshot`] at once, so any reader sees either the old or the
//! new record, never a mix.

use alsidr_core::sensor::SensorReading;
use alsidr_core::types::Timestamp;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use tokio::sync::watch;

/// A sensor reading together with when and in which order it was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSnapshot {
    /// Number of replacements since startup (the initial reading is `0`).
    pub sequence: u64,
    pub received_at: Timestamp,
    #[serde(flatten)]
    pub reading: SensorReading,
}

pub struct SensorFeed {
    sender: watch::Sender<SensorSnapshot>,
}

impl SensorFeed {
    pub fn new(initial: SensorReading) -> Self {
        let (sender, _) = watch::channel(SensorSnapshot {
            sequence: 0,
            received_at: Utc::now(),
            reading: initial,
        });
        Self { sender }
    }

    /// Clone of the current snapshot.
    pub fn snapshot(&self) -> SensorSnapshot {
        self.sender.borrow().clone()
    }

    /// Receiver notified on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<SensorSnapshot> {
        self.sender.subscribe()
    }

    /// Replace the reading with its simulated successor.
    ///
    /// The successor is derived and stored under the channel's write lock,
    /// so two concurrent calls can never both start from the same record.
    pub fn advance<R: Rng + ?Sized>(&self, rng: &mut R) -> SensorSnapshot {
        let mut next = None;
        self.sender.send_modify(|snapshot| {
            *snapshot = SensorSnapshot {
                sequence: snapshot.sequence + 1,
                received_at: Utc::now(),
                reading: snapshot.reading.next(rng),
            };
            next = Some(snapshot.clone());
        });
        next.unwrap_or_else(|| self.snapshot())
    }
}
