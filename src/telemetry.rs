//! Application telemetry events and sinks.
//!
//! devlog captures a few operational signals, such as the active database
//! schema version and how sync jobs ended, as structured events. Events stay
//! local: they are either dropped or written to stderr as JSON lines.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A structured telemetry event emitted by devlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the current database schema version after migrations apply.
    SchemaVersionRecorded {
        /// Diesel migration version string (e.g. `20261019000000`).
        schema_version: String,
    },
    /// Records how a monitored sync job finished.
    SyncFinished {
        /// Outcome name (`completed`, `possibly_still_running`, `cancelled`).
        outcome: String,
        /// Log lines received while monitoring.
        lines_received: u64,
        /// Polls attempted, successful or not.
        polls: u64,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// An event stamped with the time it was recorded.
#[derive(Debug, Serialize)]
struct StampedEvent<'event> {
    at: DateTime<Utc>,
    #[serde(flatten)]
    event: &'event TelemetryEvent,
}

/// Writes each event to stderr as one JSON line with an `at` timestamp.
///
/// Events never leave the machine.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        if let Err(error) = write_jsonl(&mut io::stderr().lock(), &event) {
            debug!(%error, "dropped telemetry event");
        }
    }
}

fn write_jsonl<W: Write>(writer: &mut W, event: &TelemetryEvent) -> io::Result<()> {
    let stamped = StampedEvent {
        at: Utc::now(),
        event,
    };
    serde_json::to_writer(&mut *writer, &stamped)?;
    writeln!(writer)
}

/// Sinks for asserting on emitted events in tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every event in memory.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingSink {
        /// Drains and returns the recorded events.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|mut events| events.drain(..).collect())
                .unwrap_or_default()
        }
    }

    impl TelemetrySink for RecordingSink {
        fn record(&self, event: TelemetryEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }
}
