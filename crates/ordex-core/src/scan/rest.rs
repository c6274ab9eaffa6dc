use crate::{
    codec::KeySentinel,
    error::EngineError,
    scan::{ColumnScanOps, restore_prefix, shares_prefix},
    store::{SeekComparison, StoreScan},
};

///
/// RestOfKeyScan
///
/// Subtree walk over every remaining key column at once. Valid only when
/// the unconstrained suffix shares a single direction: plain byte order
/// (or its reverse) over the rest of the key is then exactly the
/// declared order. Always the deepest state, so it yields complete
/// entry keys.
///

#[derive(Clone, Debug)]
pub(crate) struct RestOfKeyScan {
    entry: Vec<u8>,
    ascending: bool,
}

impl RestOfKeyScan {
    pub(crate) const fn new(ascending: bool) -> Self {
        Self {
            entry: Vec::new(),
            ascending,
        }
    }

    pub(crate) fn entry_len(&self) -> usize {
        self.entry.len()
    }

    /// Park the buffer at the subtree edge the walk ran off, so the
    /// parent column can resume from a well-formed prefix.
    fn park_at_edge<S: StoreScan>(&self, scan: &mut S) {
        restore_prefix(scan, &self.entry);
        scan.append_sentinel(if self.ascending {
            KeySentinel::Before
        } else {
            KeySentinel::After
        });
    }
}

impl ColumnScanOps for RestOfKeyScan {
    fn start_scan<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError> {
        self.entry = scan.key().to_vec();

        let cmp = if self.ascending {
            SeekComparison::Gteq
        } else {
            SeekComparison::Lteq
        };
        if !scan.traverse(cmp, true)? {
            restore_prefix(scan, &self.entry);
            return Ok(false);
        }

        if !shares_prefix(scan, self.entry.len()) {
            self.park_at_edge(scan);
            return Ok(false);
        }

        Ok(true)
    }

    fn advance<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError> {
        let stepped = if self.ascending {
            scan.next(false)?
        } else {
            scan.previous(false)?
        };
        if !stepped {
            self.park_at_edge(scan);
            return Ok(false);
        }

        if !shares_prefix(scan, self.entry.len()) {
            self.park_at_edge(scan);
            return Ok(false);
        }

        Ok(true)
    }
}
