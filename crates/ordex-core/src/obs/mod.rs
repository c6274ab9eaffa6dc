//! Observability: cursor and sorter telemetry behind a sink seam.
//!
//! Engine logic never reads or writes counter state directly; every
//! instrumentation point flows through `MetricsEvent` and `MetricsSink`.

pub(crate) mod metrics;
pub(crate) mod sink;

pub use metrics::MetricsState;
pub use sink::{CursorKind, MetricsEvent, MetricsSink, with_metrics_sink};

pub(crate) use sink::record;

/// Snapshot the current metrics counters for endpoint/test plumbing.
#[must_use]
pub fn metrics_snapshot() -> MetricsState {
    metrics::with_state(Clone::clone)
}

/// Reset all metrics counters (useful in tests).
pub fn metrics_reset() {
    metrics::reset();
}
