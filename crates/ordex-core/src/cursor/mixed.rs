use crate::{
    codec::SortCodec,
    cursor::{CursorState, RowCursor, boundary, validate_ordering},
    error::{EngineError, ErrorOrigin},
    obs::{self, CursorKind, MetricsEvent},
    ordering::SortOrdering,
    range::IndexKeyRange,
    row::RowShape,
    scan::{
        BoundedScan, ColumnScan, ColumnScanOps, RestOfKeyScan, SingleSegmentScan, UnboundedScan,
    },
    store::StoreScan,
};

/// Where the seek loop resumes: stepping the current column forward, or
/// descending into the next one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Step {
    Advance,
    Descend,
}

///
/// MixedOrderCursor
///
/// Range cursor for orderings that mix sort directions. Rows no longer
/// form one contiguous key interval, so the cursor runs one scan state
/// per ordering column and nests them: each state walks its own segment
/// in its own direction under the prefix the states above it pinned,
/// backtracking to the nearest ancestor with another segment whenever a
/// column runs out. Lexicographic ranges order the bound columns as one
/// tuple and only make sense over a single interval; they are rejected
/// at construction.
///

pub struct MixedOrderCursor<C: SortCodec, S: StoreScan> {
    codec: C,
    scan: S,
    ordering: SortOrdering,
    shape: RowShape,
    range: IndexKeyRange<C::Row>,
    states: Vec<ColumnScan>,
    state: CursorState,
    just_opened: bool,
    rows: u64,
}

impl<C: SortCodec, S: StoreScan> MixedOrderCursor<C, S> {
    /// Bind a codec, a store scan, and a per-column range to an ordering.
    /// Value-level validation needs the codec and happens at `open`.
    pub fn new(
        codec: C,
        scan: S,
        ordering: SortOrdering,
        shape: RowShape,
        range: IndexKeyRange<C::Row>,
    ) -> Result<Self, EngineError> {
        validate_ordering(&ordering)?;
        if range.is_lexicographic() {
            return Err(EngineError::cursor_unsupported(
                "lexicographic ranges require a unidirectional cursor",
            ));
        }

        Ok(Self {
            codec,
            scan,
            ordering,
            shape,
            range,
            states: Vec::new(),
            state: CursorState::Unopened,
            just_opened: false,
            rows: 0,
        })
    }

    /// Lower the range onto one scan state per ordering column: a pinned
    /// segment for every equality column, the encoded bounds for the last
    /// bound column, and free traversal for the rest of the key. A suffix
    /// that keeps one direction collapses into a single rest-of-key state.
    fn build_states(&self) -> Result<Vec<ColumnScan>, EngineError> {
        let bound = self.range.bound_columns();
        if bound > self.ordering.len() {
            return Err(EngineError::invalid_bound(
                ErrorOrigin::Cursor,
                format!(
                    "range binds {bound} columns over a {}-column ordering",
                    self.ordering.len()
                ),
            ));
        }

        let mut states = Vec::with_capacity(self.ordering.len());

        for index in 0..bound.saturating_sub(1) {
            let column = boundary::ordering_column(&self.ordering, index)?;
            let lo = boundary::bound_value(&self.codec, self.range.lo(), column, index)?;
            let hi = boundary::bound_value(&self.codec, self.range.hi(), column, index)?;
            self.codec.check_equality(column, &lo, &hi)?;

            let segment = boundary::encode_segment(&self.codec, column, &lo)?;
            states.push(ColumnScan::SingleSegment(SingleSegmentScan::fixed(
                column.direction.is_ascending(),
                segment,
            )));
        }

        if bound > 0 {
            let index = bound - 1;
            let column = boundary::ordering_column(&self.ordering, index)?;
            let lo = boundary::bound_value(&self.codec, self.range.lo(), column, index)?;
            let hi = boundary::bound_value(&self.codec, self.range.hi(), column, index)?;
            let (lo_side, hi_side) = boundary::final_column_bounds(
                &self.codec,
                column,
                &lo,
                self.range.lo().inclusive,
                &hi,
                self.range.hi().inclusive,
            )?;

            let ascending = column.direction.is_ascending();
            let (start, end) = if ascending {
                (lo_side, hi_side)
            } else {
                (hi_side, lo_side)
            };
            states.push(ColumnScan::Bounded(BoundedScan::new(ascending, start, end)));
        }

        let suffix = &self.ordering.columns()[bound..];
        if !suffix.is_empty() {
            let first = suffix[0].direction;
            if suffix.iter().all(|column| column.direction == first) {
                states.push(ColumnScan::RestOfKey(RestOfKeyScan::new(
                    first.is_ascending(),
                )));
            } else {
                for column in suffix {
                    states.push(ColumnScan::Unbounded(UnboundedScan::new(
                        column.direction.is_ascending(),
                    )));
                }
            }
        }

        Ok(states)
    }

    /// Drive the nested states to the next full key, starting at `column`
    /// with `step`. Returns false once the first column is out of
    /// segments. Every cut back to a state's entry length also strips the
    /// sentinel a rest-of-key state parks on failure.
    fn seek_row(&mut self, column: usize, step: Step) -> Result<bool, EngineError> {
        let mut index = column;
        let mut step = step;

        loop {
            match step {
                Step::Advance => {
                    if self.states[index].advance(&mut self.scan)? {
                        step = Step::Descend;
                    } else if index == 0 {
                        return Ok(false);
                    } else {
                        self.scan.cut(self.states[index].entry_len());
                        index -= 1;
                    }
                }
                Step::Descend => {
                    if index + 1 == self.states.len() {
                        return Ok(true);
                    }

                    let entry = self.states[index].segment_boundary(&self.scan)?;
                    self.scan.cut(entry);
                    index += 1;

                    if !self.states[index].start_scan(&mut self.scan)? {
                        self.scan.cut(self.states[index].entry_len());
                        index -= 1;
                        step = Step::Advance;
                    }
                }
            }
        }
    }

    /// Release the traversal and settle into `state`, recording the
    /// lifetime row count. Runs exactly once per opened cursor.
    fn release(&mut self, state: CursorState) {
        obs::record(MetricsEvent::CursorClosed {
            kind: CursorKind::MixedOrder,
            rows: self.rows,
        });
        self.scan.clear();
        self.states.clear();
        self.state = state;
    }

    /// Decode the row under the scan position and count it.
    fn current_row(&mut self) -> Result<C::Row, EngineError> {
        let bytes = self.scan.record()?;
        let row = self.codec.decode_row(&bytes, &self.shape)?;
        self.rows = self.rows.saturating_add(1);

        Ok(row)
    }
}

impl<C: SortCodec, S: StoreScan> RowCursor for MixedOrderCursor<C, S> {
    type Row = C::Row;

    fn open(&mut self) -> Result<(), EngineError> {
        if self.state != CursorState::Unopened {
            return Err(EngineError::cursor_invariant(
                "open on a cursor that is not unopened",
            ));
        }

        self.states = self.build_states()?;
        self.scan.clear();

        let found = if self.states[0].start_scan(&mut self.scan)? {
            self.seek_row(0, Step::Descend)?
        } else {
            false
        };

        obs::record(MetricsEvent::CursorOpened {
            kind: CursorKind::MixedOrder,
        });

        if found {
            self.state = CursorState::Open;
            self.just_opened = true;
        } else {
            self.release(CursorState::Exhausted);
        }

        Ok(())
    }

    fn next(&mut self) -> Result<Option<C::Row>, EngineError> {
        match self.state {
            CursorState::Open => {}
            CursorState::Exhausted => return Ok(None),
            CursorState::Unopened | CursorState::Closed => {
                return Err(EngineError::cursor_invariant(
                    "next on a cursor that is not open",
                ));
            }
        }

        if self.just_opened {
            // `open` already landed on the first full key.
            self.just_opened = false;
        } else {
            let last = self.states.len() - 1;
            if !self.seek_row(last, Step::Advance)? {
                self.release(CursorState::Exhausted);

                return Ok(None);
            }
        }

        self.current_row().map(Some)
    }

    fn close(&mut self) {
        match self.state {
            CursorState::Open => self.release(CursorState::Closed),
            CursorState::Unopened | CursorState::Exhausted | CursorState::Closed => {
                self.state = CursorState::Closed;
            }
        }
    }
}

impl<C: SortCodec, S: StoreScan> Drop for MixedOrderCursor<C, S> {
    fn drop(&mut self) {
        self.close();
    }
}
