//! Application telemetry events and sinks.
//!
//! The console records a handful of operational signals (how long the list
//! took to load, which decisions were confirmed by the service) so that a
//! log file captures what an operator did during a session.

use serde::{Deserialize, Serialize};

use crate::service::LoanStatus;

/// A structured telemetry event emitted by the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// The applications list loaded successfully.
    ApplicationsLoaded {
        /// Number of applications returned.
        count: usize,
        /// Round-trip time of the list request.
        latency_ms: u64,
    },
    /// The applications list failed to load.
    ApplicationsLoadFailed,
    /// The service confirmed a status change.
    DecisionRecorded {
        /// Status the application moved to.
        status: String,
    },
}

impl TelemetryEvent {
    /// Builds a [`TelemetryEvent::DecisionRecorded`] for `status`.
    #[must_use]
    pub fn decision(status: LoanStatus) -> Self {
        Self::DecisionRecorded {
            status: status.as_str().to_owned(),
        }
    }
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

/// Forwards events to `tracing` as JSON lines under the `telemetry` target.
///
/// Events end up wherever the installed subscriber writes; with no
/// subscriber they are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        tracing::info!(target: "loan_admin::telemetry", event = %serialised);
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::RecordingTelemetrySink;

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps events in memory for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingTelemetrySink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingTelemetrySink {
        /// Removes and returns every recorded event.
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|mut events| events.drain(..).collect())
                .unwrap_or_default()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        fn record(&self, event: TelemetryEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }
}
