//! Module: cursor::boundary
//! Responsibility: lower an index key range onto one linear store scan:
//! a start key with its entry comparison, and an end probe the cursor
//! compares every landed key against.
//! Boundary: consumed by the unidirectional cursor; the mixed-order
//! cursor reuses only `final_column_bounds` for its bounded column.

use crate::{
    codec::{KeyBuf, KeySentinel, SortCodec},
    error::{EngineError, ErrorOrigin},
    ordering::{SortColumn, SortOrdering},
    range::{ColumnSelector, IndexKeyRange, RangeBound},
    scan::ColumnBound,
    store::SeekComparison,
};

///
/// ScanBoundary
///
/// One evaluated range: where the scan enters the store and the probe
/// key that marks the first position past the range. Every key the
/// cursor lands on is checked against the probe, which also catches
/// keys that left the fixed prefix entirely.
///

#[derive(Clone, Debug)]
pub(crate) struct ScanBoundary {
    pub(crate) start_key: KeyBuf,
    pub(crate) start_cmp: SeekComparison,
    pub(crate) start_deep: bool,
    end_probe: KeyBuf,
    ascending: bool,
}

impl ScanBoundary {
    /// Whether a landed key lies past the end of the range.
    pub(crate) fn past_end(&self, key: &[u8]) -> bool {
        if self.ascending {
            key >= self.end_probe.as_slice()
        } else {
            key < self.end_probe.as_slice()
        }
    }
}

/// Evaluate a key range against an ordering into a linear scan boundary.
pub(crate) fn evaluate<C: SortCodec>(
    codec: &C,
    ordering: &SortOrdering,
    range: &IndexKeyRange<C::Row>,
    ascending: bool,
) -> Result<ScanBoundary, EngineError> {
    let bound = range.bound_columns();
    if bound > ordering.len() {
        return Err(EngineError::invalid_bound(
            ErrorOrigin::Cursor,
            format!(
                "range binds {bound} columns over a {}-column ordering",
                ordering.len()
            ),
        ));
    }

    if range.is_lexicographic() {
        let (start, end) = if ascending {
            (range.lo(), range.hi())
        } else {
            (range.hi(), range.lo())
        };
        let (start_key, start_cmp, start_deep) = start_walk(
            codec,
            ordering,
            bound,
            &start.row,
            start.selector,
            start.inclusive,
            ascending,
        )?;
        let end_probe = lex_end_probe(codec, ordering, start, end, bound, ascending)?;

        return Ok(ScanBoundary {
            start_key,
            start_cmp,
            start_deep,
            end_probe,
            ascending,
        });
    }

    // Fixed-equality prefix over every bound column but the last.
    let mut prefix = KeyBuf::new();
    for index in 0..bound.saturating_sub(1) {
        let column = ordering_column(ordering, index)?;
        let lo = bound_value(codec, range.lo(), column, index)?;
        let hi = bound_value(codec, range.hi(), column, index)?;
        codec.check_equality(column, &lo, &hi)?;
        codec.append_value(&mut prefix, &lo, column)?;
    }

    let (start_side, end_side) = if bound == 0 {
        (ColumnBound::Open, ColumnBound::Open)
    } else {
        let index = bound - 1;
        let column = ordering_column(ordering, index)?;
        let lo = bound_value(codec, range.lo(), column, index)?;
        let hi = bound_value(codec, range.hi(), column, index)?;
        let (lo_side, hi_side) = final_column_bounds(
            codec,
            column,
            &lo,
            range.lo().inclusive,
            &hi,
            range.hi().inclusive,
        )?;

        if ascending {
            (lo_side, hi_side)
        } else {
            (hi_side, lo_side)
        }
    };

    let (start_key, start_cmp, start_deep) = compose_start(&prefix, &start_side, ascending);
    let end_probe = compose_end(&prefix, &end_side, ascending);

    Ok(ScanBoundary {
        start_key,
        start_cmp,
        start_deep,
        end_probe,
        ascending,
    })
}

/// Lower the final bound column's two edges onto encoded column bounds.
///
/// Null edges collapse onto sentinel rules: an exclusive null edge drops
/// its side entirely; an inclusive null lower edge is the literal null
/// segment (null sorts below every value); two inclusive nulls form the
/// exact-null point range; every other null combination is unsatisfiable
/// and fails fast.
pub(crate) fn final_column_bounds<C: SortCodec>(
    codec: &C,
    column: &SortColumn,
    lo: &C::Value,
    lo_inclusive: bool,
    hi: &C::Value,
    hi_inclusive: bool,
) -> Result<(ColumnBound, ColumnBound), EngineError> {
    match (codec.is_null(lo), codec.is_null(hi)) {
        (true, true) => {
            if !(lo_inclusive && hi_inclusive) {
                return Err(EngineError::invalid_bound(
                    ErrorOrigin::Cursor,
                    "a null-to-null range must be inclusive on both sides",
                ));
            }

            let null_segment = encode_segment(codec, column, lo)?;

            Ok((
                ColumnBound::Segment {
                    bytes: null_segment.clone(),
                    inclusive: true,
                },
                ColumnBound::Segment {
                    bytes: null_segment,
                    inclusive: true,
                },
            ))
        }

        (true, false) => {
            let lo_side = if lo_inclusive {
                ColumnBound::Segment {
                    bytes: encode_segment(codec, column, lo)?,
                    inclusive: true,
                }
            } else {
                ColumnBound::Open
            };

            Ok((
                lo_side,
                ColumnBound::Segment {
                    bytes: encode_segment(codec, column, hi)?,
                    inclusive: hi_inclusive,
                },
            ))
        }

        (false, true) => {
            if hi_inclusive {
                return Err(EngineError::invalid_bound(
                    ErrorOrigin::Cursor,
                    "an inclusive null upper bound requires a null lower bound",
                ));
            }

            Ok((
                ColumnBound::Segment {
                    bytes: encode_segment(codec, column, lo)?,
                    inclusive: lo_inclusive,
                },
                ColumnBound::Open,
            ))
        }

        (false, false) => Ok((
            ColumnBound::Segment {
                bytes: encode_segment(codec, column, lo)?,
                inclusive: lo_inclusive,
            },
            ColumnBound::Segment {
                bytes: encode_segment(codec, column, hi)?,
                inclusive: hi_inclusive,
            },
        )),
    }
}

/// Build a start key from a partially filled row: encoded segments up to
/// the first unfilled column, which ends the walk (later values cannot
/// tighten a linear start position). Also serves mid-scan jumps.
pub(crate) fn start_walk<C: SortCodec>(
    codec: &C,
    ordering: &SortOrdering,
    columns: usize,
    row: &C::Row,
    selector: ColumnSelector,
    inclusive: bool,
    ascending: bool,
) -> Result<(KeyBuf, SeekComparison, bool), EngineError> {
    let mut key = KeyBuf::new();
    for index in 0..columns {
        let column = ordering_column(ordering, index)?;
        if !selector.contains(index) {
            let (sentinel, cmp) = if ascending {
                (KeySentinel::Before, SeekComparison::Gt)
            } else {
                (KeySentinel::After, SeekComparison::Lt)
            };
            key.push_sentinel(sentinel);

            return Ok((key, cmp, true));
        }

        let value = codec.value_at(row, column.field)?;
        codec.append_value(&mut key, value, column)?;
    }

    let (cmp, deep) = match (ascending, inclusive) {
        (true, true) => (SeekComparison::Gteq, true),
        (true, false) => (SeekComparison::Gt, false),
        (false, true) => (SeekComparison::Lteq, true),
        (false, false) => (SeekComparison::Lt, false),
    };

    Ok((key, cmp, deep))
}

/// End probe for a lexicographic range: encoded segments of the end row
/// up to the first column that carries no limit. A null end value limits
/// the scan only as a literal null match over a null start value;
/// otherwise the side is open from that column on.
fn lex_end_probe<C: SortCodec>(
    codec: &C,
    ordering: &SortOrdering,
    start: &RangeBound<C::Row>,
    end: &RangeBound<C::Row>,
    bound_columns: usize,
    ascending: bool,
) -> Result<KeyBuf, EngineError> {
    let stop = if ascending {
        KeySentinel::After
    } else {
        KeySentinel::Before
    };

    let mut probe = KeyBuf::new();
    for index in 0..bound_columns {
        let column = ordering_column(ordering, index)?;
        if !end.selector.contains(index) {
            probe.push_sentinel(stop);

            return Ok(probe);
        }

        let value = codec.value_at(&end.row, column.field)?;
        if codec.is_null(value) {
            let start_value = bound_value(codec, start, column, index)?;
            if !(end.inclusive && codec.is_null(&start_value)) {
                probe.push_sentinel(stop);

                return Ok(probe);
            }
        }

        codec.append_value(&mut probe, value, column)?;
    }

    // Ascending-inclusive and descending-exclusive probes sit past the
    // last segment's whole subtree.
    if end.inclusive == ascending {
        probe.push_sentinel(KeySentinel::After);
    }

    Ok(probe)
}

fn compose_start(
    prefix: &KeyBuf,
    side: &ColumnBound,
    ascending: bool,
) -> (KeyBuf, SeekComparison, bool) {
    let mut key = prefix.clone();
    match side {
        ColumnBound::Segment { bytes, inclusive } => {
            key.extend_from(bytes);
            // An inclusive edge enters the matching subtree; an
            // exclusive edge skips past the whole subtree.
            let (cmp, deep) = match (ascending, *inclusive) {
                (true, true) => (SeekComparison::Gteq, true),
                (true, false) => (SeekComparison::Gt, false),
                (false, true) => (SeekComparison::Lteq, true),
                (false, false) => (SeekComparison::Lt, false),
            };

            (key, cmp, deep)
        }
        ColumnBound::Open => {
            let (sentinel, cmp) = if ascending {
                (KeySentinel::Before, SeekComparison::Gt)
            } else {
                (KeySentinel::After, SeekComparison::Lt)
            };
            key.push_sentinel(sentinel);

            (key, cmp, true)
        }
    }
}

fn compose_end(prefix: &KeyBuf, side: &ColumnBound, ascending: bool) -> KeyBuf {
    let mut probe = prefix.clone();
    match side {
        ColumnBound::Segment { bytes, inclusive } => {
            probe.extend_from(bytes);
            if *inclusive == ascending {
                probe.push_sentinel(KeySentinel::After);
            }
        }
        ColumnBound::Open => {
            let sentinel = if ascending {
                KeySentinel::After
            } else {
                KeySentinel::Before
            };
            probe.push_sentinel(sentinel);
        }
    }

    probe
}

pub(crate) fn ordering_column(
    ordering: &SortOrdering,
    index: usize,
) -> Result<&SortColumn, EngineError> {
    ordering.get(index).ok_or_else(|| {
        EngineError::cursor_invariant(format!("ordering column {index} is out of range"))
    })
}

/// The bound value a range presents for one column: the row's value when
/// the selector fills the column, the codec's null otherwise.
pub(crate) fn bound_value<C: SortCodec>(
    codec: &C,
    bound: &RangeBound<C::Row>,
    column: &SortColumn,
    index: usize,
) -> Result<C::Value, EngineError> {
    if bound.selector.contains(index) {
        Ok(codec.value_at(&bound.row, column.field)?.clone())
    } else {
        Ok(codec.null_value())
    }
}

/// One value encoded as a standalone segment.
pub(crate) fn encode_segment<C: SortCodec>(
    codec: &C,
    column: &SortColumn,
    value: &C::Value,
) -> Result<Vec<u8>, EngineError> {
    let mut buf = KeyBuf::new();
    codec.append_value(&mut buf, value, column)?;

    Ok(buf.into_bytes())
}
