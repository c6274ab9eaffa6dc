use crate::{
    codec::SortCodec,
    cursor::{CursorState, RowCursor, boundary, boundary::ScanBoundary, validate_ordering},
    error::EngineError,
    obs::{self, CursorKind, MetricsEvent},
    ordering::SortOrdering,
    range::{ColumnSelector, IndexKeyRange},
    row::RowShape,
    store::{SeekComparison, StoreScan},
};

///
/// UnidirectionalCursor
///
/// Range cursor over a uniform-direction ordering. The range lowers to a
/// single contiguous key interval, so traversal is one store walk: seek
/// to the start edge at `open`, step key by key, stop at the end probe.
/// Orderings that mix directions need the mixed-order cursor instead.
///

pub struct UnidirectionalCursor<C: SortCodec, S: StoreScan> {
    codec: C,
    scan: S,
    ordering: SortOrdering,
    shape: RowShape,
    range: IndexKeyRange<C::Row>,
    ascending: bool,
    boundary: Option<ScanBoundary>,
    state: CursorState,
    just_opened: bool,
    rows: u64,
}

impl<C: SortCodec, S: StoreScan> UnidirectionalCursor<C, S> {
    /// Bind a codec, a store scan, and a range to a uniform ordering.
    /// The range itself is evaluated lazily at `open`.
    pub fn new(
        codec: C,
        scan: S,
        ordering: SortOrdering,
        shape: RowShape,
        range: IndexKeyRange<C::Row>,
    ) -> Result<Self, EngineError> {
        validate_ordering(&ordering)?;
        let Some(direction) = ordering.uniform_direction() else {
            return Err(EngineError::cursor_unsupported(
                "mixed-direction orderings require the mixed-order cursor",
            ));
        };

        Ok(Self {
            codec,
            scan,
            ordering,
            shape,
            range,
            ascending: direction.is_ascending(),
            boundary: None,
            state: CursorState::Unopened,
            just_opened: false,
            rows: 0,
        })
    }

    /// Seek the scan to `key` under the given entry comparison.
    fn position(
        &mut self,
        key: &[u8],
        cmp: SeekComparison,
        deep: bool,
    ) -> Result<bool, EngineError> {
        self.scan.clear();
        self.scan.append(key);

        Ok(self.scan.traverse(cmp, deep)?)
    }

    /// Release the traversal and settle into `state`, recording the
    /// lifetime row count. Runs exactly once per opened cursor.
    fn release(&mut self, state: CursorState) {
        obs::record(MetricsEvent::CursorClosed {
            kind: CursorKind::Unidirectional,
            rows: self.rows,
        });
        self.scan.clear();
        self.state = state;
    }

    /// Decode the row under the scan position and count it.
    fn current_row(&mut self) -> Result<C::Row, EngineError> {
        let bytes = self.scan.record()?;
        let row = self.codec.decode_row(&bytes, &self.shape)?;
        self.rows = self.rows.saturating_add(1);

        Ok(row)
    }

    fn evaluated_boundary(&self) -> Result<&ScanBoundary, EngineError> {
        self.boundary
            .as_ref()
            .ok_or_else(|| EngineError::cursor_invariant("open cursor has no evaluated boundary"))
    }
}

impl<C: SortCodec, S: StoreScan> RowCursor for UnidirectionalCursor<C, S> {
    type Row = C::Row;

    fn open(&mut self) -> Result<(), EngineError> {
        if self.state != CursorState::Unopened {
            return Err(EngineError::cursor_invariant(
                "open on a cursor that is not unopened",
            ));
        }

        let boundary =
            boundary::evaluate(&self.codec, &self.ordering, &self.range, self.ascending)?;
        let found = self.position(
            boundary.start_key.as_slice(),
            boundary.start_cmp,
            boundary.start_deep,
        )?;
        let in_range = found && !boundary.past_end(self.scan.key());
        self.boundary = Some(boundary);

        obs::record(MetricsEvent::CursorOpened {
            kind: CursorKind::Unidirectional,
        });

        if in_range {
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
            // `open` (or a jump) already positioned on the first row.
            self.just_opened = false;
        } else {
            let stepped = if self.ascending {
                self.scan.next(true)?
            } else {
                self.scan.previous(true)?
            };
            if !stepped || self.evaluated_boundary()?.past_end(self.scan.key()) {
                self.release(CursorState::Exhausted);

                return Ok(None);
            }
        }

        self.current_row().map(Some)
    }

    fn jump(&mut self, row: &C::Row, selector: ColumnSelector) -> Result<(), EngineError> {
        if self.state != CursorState::Open {
            return Err(EngineError::cursor_invariant(
                "jump on a cursor that is not open",
            ));
        }

        // A jump target is a fully bound inclusive start edge; columns the
        // selector leaves out read as open from that point on.
        let (key, cmp, deep) = boundary::start_walk(
            &self.codec,
            &self.ordering,
            self.ordering.len(),
            row,
            selector,
            true,
            self.ascending,
        )?;
        let found = self.position(key.as_slice(), cmp, deep)?;

        if found && !self.evaluated_boundary()?.past_end(self.scan.key()) {
            self.just_opened = true;
        } else {
            self.release(CursorState::Exhausted);
        }

        Ok(())
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

impl<C: SortCodec, S: StoreScan> Drop for UnidirectionalCursor<C, S> {
    fn drop(&mut self) {
        self.close();
    }
}
