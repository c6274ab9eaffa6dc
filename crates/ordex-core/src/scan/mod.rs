//! Per-column scan states. A cursor composes one state per key column
//! (or one `RestOfKey` for a uniform unconstrained suffix); each state
//! drives the shared store handle for its own column and reports
//! exhaustion upward so the cursor can backtrack.

mod bounded;
mod rest;
mod single;
mod unbounded;


pub(crate) use bounded::BoundedScan;
pub(crate) use rest::RestOfKeyScan;
pub(crate) use single::SingleSegmentScan;
pub(crate) use unbounded::UnboundedScan;

use crate::{
    codec,
    error::{EngineError, ErrorClass, ErrorOrigin},
    store::StoreScan,
};

///
/// ColumnBound
///
/// One side of a single column's range, already lowered to an encoded
/// segment. `Open` means the side carries no restriction at all.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ColumnBound {
    Segment { bytes: Vec<u8>, inclusive: bool },
    Open,
}

///
/// ColumnScanOps
///
/// Shared contract across the scan-state variants. Every operation works
/// against the store handle's key buffer: on success the buffer holds an
/// entry key extending this state's entry prefix; on exhaustion the
/// buffer is restored to the entry prefix so ancestor states stay valid.
///

pub(crate) trait ColumnScanOps {
    /// Position at the first entry this column admits under the current
    /// key prefix.
    fn start_scan<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError>;

    /// Move to this column's next admissible value. Requires the buffer
    /// to hold exactly the entry prefix plus the current segment.
    fn advance<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError>;

    /// Reposition directly onto the encoded `target` segment without
    /// replaying intermediate values. Skip-scan support; optional.
    fn jump<S: StoreScan>(&mut self, scan: &mut S, target: &[u8]) -> Result<bool, EngineError> {
        let _ = (scan, target);

        Err(EngineError::new(
            ErrorClass::Unsupported,
            ErrorOrigin::Scan,
            "jump is not supported by this scan state",
        ))
    }
}

///
/// ColumnScan
///

#[derive(Clone, Debug)]
pub(crate) enum ColumnScan {
    Unbounded(UnboundedScan),
    Bounded(BoundedScan),
    RestOfKey(RestOfKeyScan),
    SingleSegment(SingleSegmentScan),
}

impl ColumnScan {
    /// Buffer length at this state's subtree entry, i.e. where its own
    /// segment begins.
    pub(crate) fn entry_len(&self) -> usize {
        match self {
            Self::Unbounded(scan) => scan.entry_len(),
            Self::Bounded(scan) => scan.entry_len(),
            Self::RestOfKey(scan) => scan.entry_len(),
            Self::SingleSegment(scan) => scan.entry_len(),
        }
    }

    /// Byte offset just past this state's own segment in the current
    /// key, i.e. where the next column's state takes over.
    pub(crate) fn segment_boundary<S: StoreScan>(&self, scan: &S) -> Result<usize, EngineError> {
        match self {
            // The rest-of-key walk owns everything to the end of the key.
            Self::RestOfKey(_) => Ok(scan.key().len()),
            Self::Unbounded(_) | Self::Bounded(_) | Self::SingleSegment(_) => {
                let end = codec::segment_end(scan.key(), self.entry_len())?;

                Ok(end)
            }
        }
    }
}

impl ColumnScanOps for ColumnScan {
    fn start_scan<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError> {
        match self {
            Self::Unbounded(state) => state.start_scan(scan),
            Self::Bounded(state) => state.start_scan(scan),
            Self::RestOfKey(state) => state.start_scan(scan),
            Self::SingleSegment(state) => state.start_scan(scan),
        }
    }

    fn advance<S: StoreScan>(&mut self, scan: &mut S) -> Result<bool, EngineError> {
        match self {
            Self::Unbounded(state) => state.advance(scan),
            Self::Bounded(state) => state.advance(scan),
            Self::RestOfKey(state) => state.advance(scan),
            Self::SingleSegment(state) => state.advance(scan),
        }
    }

    fn jump<S: StoreScan>(&mut self, scan: &mut S, target: &[u8]) -> Result<bool, EngineError> {
        match self {
            Self::Unbounded(state) => state.jump(scan, target),
            Self::Bounded(state) => state.jump(scan, target),
            Self::RestOfKey(state) => state.jump(scan, target),
            Self::SingleSegment(state) => state.jump(scan, target),
        }
    }
}

/// Put the key buffer back to a saved prefix, discarding whatever a
/// failed traversal left behind.
pub(super) fn restore_prefix<S: StoreScan>(scan: &mut S, prefix: &[u8]) {
    scan.clear();
    scan.append(prefix);
}

/// True when the last positioning kept at least `len` leading bytes,
/// i.e. the found key still lies inside the entry prefix's subtree.
pub(super) fn shares_prefix<S: StoreScan>(scan: &S, len: usize) -> bool {
    scan.first_unique_byte_index() >= len
}

/// This state's own segment within the current key.
pub(super) fn own_segment<S: StoreScan>(scan: &S, entry_len: usize) -> Result<&[u8], EngineError> {
    let key = scan.key();
    let end = codec::segment_end(key, entry_len)?;

    Ok(&key[entry_len..end])
}

/// Whether `segment` sits on the admitted side of `bound`. With
/// `at_or_above` the segment must sort at-or-above the bound edge in
/// byte order, otherwise at-or-below.
pub(super) fn segment_within(segment: &[u8], bound: &ColumnBound, at_or_above: bool) -> bool {
    match bound {
        ColumnBound::Open => true,
        ColumnBound::Segment { bytes, inclusive } => {
            let edge = bytes.as_slice();

            match (at_or_above, *inclusive) {
                (true, true) => segment >= edge,
                (true, false) => segment > edge,
                (false, true) => segment <= edge,
                (false, false) => segment < edge,
            }
        }
    }
}
