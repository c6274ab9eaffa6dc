use crate::{
    codec::KeySentinel,
    error::EngineError,
    scan::{ColumnBound, ColumnScanOps, own_segment, restore_prefix, segment_within, shares_prefix},
    store::{SeekComparison, StoreScan},
};

///
/// BoundedScan
///
/// Range scan over one key column. Seeks from the directional start
/// bound, then walks distinct segment values with shallow steps until
/// the end bound or the entry prefix is left behind. `start` is the lo
/// side when ascending and the hi side when descending.
///

#[derive(Clone, Debug)]
pub(crate) struct BoundedScan {
    entry: Vec<u8>,
    ascending: bool,
    start: ColumnBound,
    end: ColumnBound,
}

impl BoundedScan {
    pub(crate) const fn new(ascending: bool, start: ColumnBound, end: ColumnBound) -> Self {
        Self {
            entry: Vec::new(),
            ascending,
            start,
            end,
        }
    }

    pub(crate) fn entry_len(&self) -> usize {
        self.entry.len()
    }

    pub(super) fn entry(&self) -> &[u8] {
        &self.entry
    }

    pub(super) const fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// Whether an encoded segment lies between the start and end bounds.
    pub(super) fn admits_segment(&self, segment: &[u8]) -> bool {
        segment_within(segment, &self.start, self.ascending)
            && segment_within(segment, &self.end, !self.ascending)
    }

    /// Validate the entry the store landed on: it must extend the entry
    /// prefix and its segment must not have passed the end bound.
    pub(super) fn check_position<S: StoreScan>(&self, scan: &mut S) -> Result<bool, EngineError> {
        if !shares_prefix(scan, self.entry.len()) {
            restore_prefix(scan, &self.entry);
            return Ok(false);
        }

        let in_range = {
            let segment = own_segment(scan, self.entry.len())?;

            segment_within(segment, &self.end, !self.ascending)
        };
        if !in_range {
            restore_prefix(scan, &self.entry);
            return Ok(false);
        }

        Ok(true)
    }
}

impl ColumnScanOps for BoundedScan {
    fn start_scan<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError> {
        self.entry = scan.key().to_vec();

        let found = match &self.start {
            ColumnBound::Segment { bytes, inclusive } => {
                scan.append(bytes);
                // An inclusive edge enters the matching subtree; an
                // exclusive edge skips past the whole subtree.
                let (cmp, deep) = match (self.ascending, *inclusive) {
                    (true, true) => (SeekComparison::Gteq, true),
                    (true, false) => (SeekComparison::Gt, false),
                    (false, true) => (SeekComparison::Lteq, true),
                    (false, false) => (SeekComparison::Lt, false),
                };

                scan.traverse(cmp, deep)?
            }
            ColumnBound::Open => {
                let (sentinel, cmp) = if self.ascending {
                    (KeySentinel::Before, SeekComparison::Gt)
                } else {
                    (KeySentinel::After, SeekComparison::Lt)
                };
                scan.append_sentinel(sentinel);

                scan.traverse(cmp, true)?
            }
        };
        if !found {
            restore_prefix(scan, &self.entry);
            return Ok(false);
        }

        self.check_position(scan)
    }

    fn advance<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError> {
        let cmp = if self.ascending {
            SeekComparison::Gt
        } else {
            SeekComparison::Lt
        };
        // Shallow: deeper columns exhausted the current value's subtree,
        // so step past it to the next distinct segment.
        if !scan.traverse(cmp, false)? {
            restore_prefix(scan, &self.entry);
            return Ok(false);
        }

        self.check_position(scan)
    }
}
