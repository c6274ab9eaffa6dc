use crate::{
    codec::KeySentinel,
    error::EngineError,
    scan::{ColumnScanOps, restore_prefix, shares_prefix},
    store::{SeekComparison, StoreScan},
};

///
/// UnboundedScan
///
/// Full-domain scan over one key column: enter the entry prefix's
/// subtree from its directional edge, then walk distinct segment values
/// until the prefix is left behind.
///

#[derive(Clone, Debug)]
pub(crate) struct UnboundedScan {
    entry: Vec<u8>,
    ascending: bool,
}

impl UnboundedScan {
    pub(crate) const fn new(ascending: bool) -> Self {
        Self {
            entry: Vec::new(),
            ascending,
        }
    }

    pub(crate) fn entry_len(&self) -> usize {
        self.entry.len()
    }

    fn check_position<S: StoreScan>(&self, scan: &mut S) -> bool {
        if shares_prefix(scan, self.entry.len()) {
            true
        } else {
            restore_prefix(scan, &self.entry);
            false
        }
    }
}

impl ColumnScanOps for UnboundedScan {
    fn start_scan<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError> {
        self.entry = scan.key().to_vec();

        let (sentinel, cmp) = if self.ascending {
            (KeySentinel::Before, SeekComparison::Gt)
        } else {
            (KeySentinel::After, SeekComparison::Lt)
        };
        scan.append_sentinel(sentinel);

        if !scan.traverse(cmp, true)? {
            restore_prefix(scan, &self.entry);
            return Ok(false);
        }

        Ok(self.check_position(scan))
    }

    fn advance<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError> {
        let cmp = if self.ascending {
            SeekComparison::Gt
        } else {
            SeekComparison::Lt
        };
        if !scan.traverse(cmp, false)? {
            restore_prefix(scan, &self.entry);
            return Ok(false);
        }

        Ok(self.check_position(scan))
    }
}
