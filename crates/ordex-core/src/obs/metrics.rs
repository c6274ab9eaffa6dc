use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// MetricsState
/// Ephemeral, in-memory counters for cursor, sorter, and temp-region
/// activity on this thread.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MetricsState {
    // Cursor lifecycle
    pub unidirectional_cursors_opened: u64,
    pub mixed_order_cursors_opened: u64,
    pub cursors_closed: u64,
    pub rows_returned: u64,

    // Sorter
    pub sorts_started: u64,
    pub sorts_finished: u64,
    pub rows_sorted: u64,

    // Temp regions
    pub temp_regions_created: u64,
    pub temp_regions_dropped: u64,
}

thread_local! {
    static METRICS_STATE: RefCell<MetricsState> = RefCell::new(MetricsState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&MetricsState) -> R) -> R {
    METRICS_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut MetricsState) -> R) -> R {
    METRICS_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset() {
    with_state_mut(|m| *m = MetricsState::default());
}
