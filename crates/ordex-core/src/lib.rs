//! Core runtime for Ordex: ordered key codecs, per-column scan states, the
//! cursor hierarchy, and the external sorter, plus the ergonomics exported
//! via the `prelude`.
#![warn(unreachable_pub)]

pub mod codec;
pub mod cursor;
pub mod error;
pub mod obs;
pub mod ordering;
pub mod range;
pub mod row;
pub mod serialize;
pub mod session;
pub mod sort;
pub mod store;
pub mod value;

// Scan states are internal machinery; cursors are the public traversal
// surface.
pub(crate) mod scan;

///
/// CONSTANTS
///

/// Maximum number of key columns a single ordering may declare.
///
/// This limit keeps composite keys within bounded, storable sizes and lets
/// column selectors fit a single word.
pub const MAX_KEY_COLUMNS: usize = 16;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, serializers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        cursor::{MixedOrderCursor, RowCursor, UnidirectionalCursor},
        ordering::{Direction, SortColumn, SortOrdering},
        range::{ColumnSelector, IndexKeyRange, RangeBound},
        row::{Row, RowShape, TypedRow},
        session::{CancelToken, QueryContext, Session, SessionId},
        sort::{DuplicateHandling, ExternalSorter, SortedRows},
        value::{Datum, Value, ValueType},
    };
}
