//! Row cursors: the traversal surface over an ordered store. A cursor
//! binds a codec, an ordering, and a key range to one store handle and
//! yields decoded rows in the declared order until the range is done.

pub(crate) mod boundary;

mod mixed;
mod unidirectional;

#[cfg(test)]
mod tests;

pub use mixed::MixedOrderCursor;
pub use unidirectional::UnidirectionalCursor;

use crate::{
    MAX_KEY_COLUMNS,
    error::{EngineError, ErrorOrigin},
    ordering::SortOrdering,
    range::ColumnSelector,
};

///
/// RowCursor
///
/// Lifecycle contract shared by every cursor: `open` evaluates the range
/// and positions at the first row, `next` yields rows until exhaustion,
/// `close` releases the traversal exactly once and may be called on any
/// state. Exhaustion closes the cursor on its own; `next` afterwards
/// keeps returning no row.
///

pub trait RowCursor {
    type Row;

    fn open(&mut self) -> Result<(), EngineError>;

    fn next(&mut self) -> Result<Option<Self::Row>, EngineError>;

    /// Reposition mid-scan at the first row at-or-past the target in the
    /// traversal direction. `selector` names the target columns that are
    /// filled; the rest read as open. Optional.
    fn jump(&mut self, row: &Self::Row, selector: ColumnSelector) -> Result<(), EngineError> {
        let _ = (row, selector);

        Err(EngineError::cursor_unsupported(
            "jump is not supported by this cursor",
        ))
    }

    fn close(&mut self);
}

///
/// CursorState
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CursorState {
    Unopened,
    Open,
    /// Ran out of rows; the traversal is already released.
    Exhausted,
    Closed,
}

/// Structural ordering check shared by the cursors and the sorter.
pub(crate) fn validate_ordering(ordering: &SortOrdering) -> Result<(), EngineError> {
    if ordering.is_empty() {
        return Err(EngineError::invalid_bound(
            ErrorOrigin::Cursor,
            "ordering must name at least one column",
        ));
    }

    if ordering.len() > MAX_KEY_COLUMNS {
        return Err(EngineError::invalid_bound(
            ErrorOrigin::Cursor,
            format!(
                "ordering names {} columns (limit {MAX_KEY_COLUMNS})",
                ordering.len()
            ),
        ));
    }

    Ok(())
}
