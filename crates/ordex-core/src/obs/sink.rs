//! Metrics sink boundary.
//!
//! Cursor and sorter logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between traversal logic
//! and the global metrics state.
use crate::obs::metrics;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// CursorKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CursorKind {
    Unidirectional,
    MixedOrder,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    CursorOpened {
        kind: CursorKind,
    },
    CursorClosed {
        kind: CursorKind,
        rows: u64,
    },
    SortStarted,
    SortFinished {
        rows: u64,
    },
    TempRegionCreated,
    TempRegionDropped,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default process-local sink that writes into global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::CursorOpened { kind } => {
                metrics::with_state_mut(|m| match kind {
                    CursorKind::Unidirectional => {
                        m.unidirectional_cursors_opened =
                            m.unidirectional_cursors_opened.saturating_add(1);
                    }
                    CursorKind::MixedOrder => {
                        m.mixed_order_cursors_opened =
                            m.mixed_order_cursors_opened.saturating_add(1);
                    }
                });
            }

            MetricsEvent::CursorClosed { kind: _, rows } => {
                metrics::with_state_mut(|m| {
                    m.cursors_closed = m.cursors_closed.saturating_add(1);
                    m.rows_returned = m.rows_returned.saturating_add(rows);
                });
            }

            MetricsEvent::SortStarted => {
                metrics::with_state_mut(|m| {
                    m.sorts_started = m.sorts_started.saturating_add(1);
                });
            }

            MetricsEvent::SortFinished { rows } => {
                metrics::with_state_mut(|m| {
                    m.sorts_finished = m.sorts_finished.saturating_add(1);
                    m.rows_sorted = m.rows_sorted.saturating_add(rows);
                });
            }

            MetricsEvent::TempRegionCreated => {
                metrics::with_state_mut(|m| {
                    m.temp_regions_created = m.temp_regions_created.saturating_add(1);
                });
            }

            MetricsEvent::TempRegionDropped => {
                metrics::with_state_mut(|m| {
                    m.temp_regions_dropped = m.temp_regions_dropped.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - We materialize only a shared reference (`&dyn MetricsSink`), matching the
        //   original shared borrow used to install the override.
        // - No mutable alias to the same sink is created here.
        //
        // What would break this:
        // - If `with_metrics_sink` failed to restore on all exits (normal + panic),
        //   `ptr` could outlive the borrowed sink and become dangling.
        // - If `record` were changed to store or dispatch asynchronously using `ptr`,
        //   lifetime assumptions would no longer hold.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // Preconditions:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` always restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    //
    // Aliasing:
    // - We erase lifetime to a raw pointer, but still only expose shared access.
    // - No mutable alias to the same sink is introduced by this conversion.
    //
    // What would break this:
    // - Any async/deferred use of `sink_ptr` beyond this scope.
    // - Any path that bypasses Guard restoration.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}
