use crate::{
    error::EngineError,
    scan::{BoundedScan, ColumnBound, ColumnScanOps, restore_prefix},
    store::{SeekComparison, StoreScan},
};

///
/// SingleSegmentScan
///
/// Bounded scan over one column with skip-scan support. Fixed-equality
/// prefix columns use the degenerate form where both bound edges carry
/// the same segment; `jump` then accepts exactly that segment.
///

#[derive(Clone, Debug)]
pub(crate) struct SingleSegmentScan {
    inner: BoundedScan,
}

impl SingleSegmentScan {
    pub(crate) const fn new(ascending: bool, start: ColumnBound, end: ColumnBound) -> Self {
        Self {
            inner: BoundedScan::new(ascending, start, end),
        }
    }

    /// The fixed form: the column admits exactly one segment value.
    pub(crate) fn fixed(ascending: bool, segment: Vec<u8>) -> Self {
        let start = ColumnBound::Segment {
            bytes: segment.clone(),
            inclusive: true,
        };
        let end = ColumnBound::Segment {
            bytes: segment,
            inclusive: true,
        };

        Self::new(ascending, start, end)
    }

    pub(crate) fn entry_len(&self) -> usize {
        self.inner.entry_len()
    }
}

impl ColumnScanOps for SingleSegmentScan {
    fn start_scan<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError> {
        self.inner.start_scan(scan)
    }

    fn advance<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError> {
        self.inner.advance(scan)
    }

    /// Seek straight to `target`'s subtree when the bounds admit it.
    /// When the store has no entry for the target, fall back to the
    /// start of the segment range so the scan stays resumable.
    fn jump<S: StoreScan>(&mut self, scan: &mut S, target: &[u8]) -> Result<bool, EngineError> {
        if !self.inner.admits_segment(target) {
            return Ok(false);
        }

        restore_prefix(scan, self.inner.entry());
        scan.append(target);

        let cmp = if self.inner.is_ascending() {
            SeekComparison::Gteq
        } else {
            SeekComparison::Lteq
        };
        let landed = scan.traverse(cmp, true)?
            && scan.first_unique_byte_index() >= self.inner.entry_len() + target.len();
        if landed {
            return Ok(true);
        }

        restore_prefix(scan, self.inner.entry());
        self.inner.start_scan(scan)?;

        Ok(false)
    }
}
