//! External sorting for row streams no index covers: rows are
//! materialized into a session temp tree under an order-preserving key,
//! then read back as a cursor with one ascending walk. Descending
//! columns are byte-inverted at write time, so unlike the index cursors
//! this path serves mixed-direction orderings linearly, at the cost of
//! materializing every row.

mod temp;


use crate::{
    codec::{KeyBuf, SortCodec},
    cursor::{RowCursor, UnidirectionalCursor, boundary, validate_ordering},
    error::EngineError,
    obs::{self, MetricsEvent},
    ordering::{Direction, SortColumn, SortOrdering},
    range::IndexKeyRange,
    row::RowShape,
    session::QueryContext,
    store::MemoryScan,
};
use temp::TempRegionLease;

///
/// DuplicateHandling
///
/// What happens when two rows encode the same sort key.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DuplicateHandling {
    /// Equal-key rows collapse; the latest arrival is kept.
    Discard,
    /// Every row is kept; equal keys stay in arrival order.
    Preserve,
}

///
/// ExternalSorter
///

pub struct ExternalSorter<C: SortCodec> {
    codec: C,
    ordering: SortOrdering,
    shape: RowShape,
    duplicates: DuplicateHandling,
}

impl<C: SortCodec + Clone> ExternalSorter<C> {
    pub fn new(
        codec: C,
        ordering: SortOrdering,
        shape: RowShape,
        duplicates: DuplicateHandling,
    ) -> Result<Self, EngineError> {
        validate_ordering(&ordering)?;

        Ok(Self {
            codec,
            ordering,
            shape,
            duplicates,
        })
    }

    /// Drain `rows` into a fresh temp tree and hand back an unopened
    /// cursor over them in sorted order. The input is fallible row by
    /// row; any failure, cancellation included, scrubs the partial state
    /// before it propagates.
    pub fn sort<I>(&self, context: &QueryContext, rows: I) -> Result<SortedRows<C>, EngineError>
    where
        I: IntoIterator<Item = Result<C::Row, EngineError>>,
        C::Row: Default,
    {
        obs::record(MetricsEvent::SortStarted);

        let lease = temp::acquire(context.session_id());
        let mut loaded: u64 = 0;

        for row in rows {
            if let Err(err) = self.load_row(context, &lease, row, loaded) {
                lease.release();

                return Err(err);
            }
            loaded = loaded.saturating_add(1);
        }

        obs::record(MetricsEvent::SortFinished { rows: loaded });

        let cursor = UnidirectionalCursor::new(
            self.codec.clone(),
            lease.store().scan(),
            self.output_ordering(),
            self.shape.clone(),
            IndexKeyRange::unbounded(),
        )?;

        Ok(SortedRows {
            inner: cursor,
            lease: Some(lease),
            done: false,
        })
    }

    fn load_row(
        &self,
        context: &QueryContext,
        lease: &TempRegionLease,
        row: Result<C::Row, EngineError>,
        sequence: u64,
    ) -> Result<(), EngineError> {
        context.ensure_active()?;
        let row = row?;
        let key = self.sort_key(&row, sequence)?;
        let record = self.codec.encode_row(&row)?;
        lease.store().insert(key, record)?;

        Ok(())
    }

    /// Sort key of one row: the ordering columns' segment encoding, with
    /// descending columns bytewise inverted. Under `Preserve` the arrival
    /// sequence follows as a raw big-endian tiebreak; the suffix is only
    /// ever compared, never parsed back into segments.
    fn sort_key(&self, row: &C::Row, sequence: u64) -> Result<Vec<u8>, EngineError> {
        let mut key = KeyBuf::new();
        for column in self.ordering.columns() {
            let value = self.codec.value_at(row, column.field)?;
            if column.direction.is_ascending() {
                self.codec.append_value(&mut key, value, column)?;
            } else {
                let segment = boundary::encode_segment(&self.codec, column, value)?;
                key.append_inverted(&segment);
            }
        }

        if self.duplicates == DuplicateHandling::Preserve {
            key.extend_from(&sequence.to_be_bytes());
        }

        Ok(key.into_bytes())
    }

    /// The ordering the temp tree is read back under: every column
    /// ascending, since descending columns were inverted at write time.
    fn output_ordering(&self) -> SortOrdering {
        let columns = self
            .ordering
            .columns()
            .iter()
            .map(|column| SortColumn {
                direction: Direction::Asc,
                ..*column
            })
            .collect();

        SortOrdering::new(columns)
    }
}

///
/// SortedRows
///
/// Cursor over one finished sort. Wraps a linear walk of the temp tree
/// and keeps the region lease alive until the rows are consumed or the
/// cursor is closed.
///

pub struct SortedRows<C: SortCodec> {
    inner: UnidirectionalCursor<C, MemoryScan>,
    lease: Option<TempRegionLease>,
    done: bool,
}

impl<C: SortCodec> RowCursor for SortedRows<C> {
    type Row = C::Row;

    fn open(&mut self) -> Result<(), EngineError> {
        self.inner.open()
    }

    fn next(&mut self) -> Result<Option<C::Row>, EngineError> {
        if self.done {
            return Ok(None);
        }

        let row = self.inner.next()?;
        if row.is_none() {
            // Exhaustion retires the lease, not just the traversal.
            self.done = true;
            self.close();
        }

        Ok(row)
    }

    fn close(&mut self) {
        self.inner.close();
        if let Some(lease) = self.lease.take() {
            lease.release();
        }
    }
}

impl<C: SortCodec> Drop for SortedRows<C> {
    fn drop(&mut self) {
        self.close();
    }
}
