//! Injected observability collaborator.
//!
//! # Responsibility
//! - Let services report domain events without owning a metrics backend.
//!
//! # Invariants
//! - Recording must never fail or panic; recorders are fire-and-forget.
//! - No process-global registry: services hold the recorder they were
//!   constructed with.

use log::info;

/// Domain events worth counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricEvent {
    /// A pickup point was registered.
    PointRegistered,
    /// A reception was opened.
    ReceptionOpened,
    /// An item was scanned into an open reception.
    ItemAdded,
}

impl MetricEvent {
    /// Stable counter name for this event.
    pub fn name(self) -> &'static str {
        match self {
            Self::PointRegistered => "points_registered_total",
            Self::ReceptionOpened => "receptions_opened_total",
            Self::ItemAdded => "items_added_total",
        }
    }
}

/// Sink for domain events.
///
/// Implementations may count, export, or drop events; callers only promise
/// to invoke `record` after the corresponding mutation committed.
pub trait MetricRecorder {
    fn record(&self, event: MetricEvent);
}

/// Recorder that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl MetricRecorder for NoopRecorder {
    fn record(&self, _event: MetricEvent) {}
}

/// Recorder that emits one structured log line per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRecorder;

impl MetricRecorder for LogRecorder {
    fn record(&self, event: MetricEvent) {
        info!("event=metric module=metrics name={}", event.name());
    }
}

#[cfg(test)]
mod tests {
    use super::{MetricEvent, MetricRecorder, NoopRecorder};

    #[test]
    fn event_names_are_stable() {
        assert_eq!(
            MetricEvent::PointRegistered.name(),
            "points_registered_total"
        );
        assert_eq!(
            MetricEvent::ReceptionOpened.name(),
            "receptions_opened_total"
        );
        assert_eq!(MetricEvent::ItemAdded.name(), "items_added_total");
    }

    #[test]
    fn noop_recorder_accepts_all_events() {
        let recorder = NoopRecorder;
        recorder.record(MetricEvent::PointRegistered);
        recorder.record(MetricEvent::ItemAdded);
    }
}
