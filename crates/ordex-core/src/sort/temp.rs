//! Module: sort::temp
//! Responsibility: session-scoped pools of scratch trees for sort
//! materialization. A region is created on first use, counts its live
//! trees, and is dropped with its last lease.
//! Boundary: the engine runs single-threaded per execution context, so
//! the registry is thread-local; leases must never cross threads.

use crate::{
    obs::{self, MetricsEvent},
    session::SessionId,
    store::MemoryStore,
};
use std::{cell::RefCell, collections::BTreeMap};

#[derive(Debug, Default)]
struct TempRegion {
    active_trees: usize,
    trees_created: u64,
}

thread_local! {
    static TEMP_REGIONS: RefCell<BTreeMap<SessionId, TempRegion>> =
        RefCell::new(BTreeMap::new());
}

///
/// TempRegionLease
///
/// Use-counted claim on a session's temp region, carrying one scratch
/// tree. Consuming `release` (or plain drop) scrubs the tree and lets
/// the region go once no other lease holds it.
///

#[derive(Debug)]
pub(crate) struct TempRegionLease {
    session_id: SessionId,
    store: MemoryStore,
    released: bool,
}

/// Claim a scratch tree in `session_id`'s temp region, creating the
/// region on first use.
pub(crate) fn acquire(session_id: SessionId) -> TempRegionLease {
    TEMP_REGIONS.with(|regions| {
        let mut regions = regions.borrow_mut();
        let region = regions.entry(session_id).or_insert_with(|| {
            obs::record(MetricsEvent::TempRegionCreated);

            TempRegion::default()
        });
        region.active_trees += 1;
        region.trees_created += 1;
    });

    TempRegionLease {
        session_id,
        store: MemoryStore::new(),
        released: false,
    }
}

impl TempRegionLease {
    /// The scratch tree this lease owns.
    pub(crate) const fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub(crate) fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        // Scrub eagerly; clones of the store handle may outlive the lease.
        self.store.clear();

        TEMP_REGIONS.with(|regions| {
            let mut regions = regions.borrow_mut();
            let Some(region) = regions.get_mut(&self.session_id) else {
                debug_assert!(false, "lease outlived its temp region");
                return;
            };
            region.active_trees = region.active_trees.saturating_sub(1);
            if region.active_trees == 0 {
                regions.remove(&self.session_id);
                obs::record(MetricsEvent::TempRegionDropped);
            }
        });
    }
}

impl Drop for TempRegionLease {
    fn drop(&mut self) {
        self.release_inner();
    }
}

/// Live-tree and total-tree counts for a session's region, if it exists.
#[cfg(test)]
pub(super) fn region_stats(session_id: SessionId) -> Option<(usize, u64)> {
    TEMP_REGIONS.with(|regions| {
        regions
            .borrow()
            .get(&session_id)
            .map(|region| (region.active_trees, region.trees_created))
    })
}
