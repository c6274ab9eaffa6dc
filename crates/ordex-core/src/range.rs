use crate::{
    MAX_KEY_COLUMNS,
    error::{EngineError, ErrorOrigin},
};

///
/// ColumnSelector
///
/// Bitset naming which key columns a bound row actually fills. Columns a
/// selector leaves out present as NULL to the boundary logic.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ColumnSelector(u32);

impl ColumnSelector {
    pub const EMPTY: Self = Self(0);

    /// Select the first `count` columns.
    #[must_use]
    pub const fn leading(count: usize) -> Self {
        if count == 0 {
            Self(0)
        } else if count >= 32 {
            Self(u32::MAX)
        } else {
            Self((1u32 << count) - 1)
        }
    }

    #[must_use]
    pub const fn single(index: usize) -> Self {
        Self::EMPTY.with(index)
    }

    #[must_use]
    pub const fn with(self, index: usize) -> Self {
        if index >= 32 {
            self
        } else {
            Self(self.0 | (1u32 << index))
        }
    }

    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        index < 32 && self.0 & (1u32 << index) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }
}

///
/// RangeBound
///
/// One side of a composite key range: a row of bound values, the selector
/// saying which columns the row fills, and the edge inclusivity.
///

#[derive(Clone, Debug)]
pub struct RangeBound<R> {
    pub row: R,
    pub selector: ColumnSelector,
    pub inclusive: bool,
}

impl<R> RangeBound<R> {
    #[must_use]
    pub const fn new(row: R, selector: ColumnSelector, inclusive: bool) -> Self {
        Self {
            row,
            selector,
            inclusive,
        }
    }

    #[must_use]
    pub const fn inclusive(row: R, selector: ColumnSelector) -> Self {
        Self::new(row, selector, true)
    }

    #[must_use]
    pub const fn exclusive(row: R, selector: ColumnSelector) -> Self {
        Self::new(row, selector, false)
    }
}

///
/// IndexKeyRange
///
/// Composite range over the leading `bound_columns` key columns. In the
/// default form at most one bound column carries an open inequality and
/// every column before it is a fixed equality; the lexicographic form
/// relaxes this to independent per-column selectors. Value-level
/// validation needs the codec and happens at cursor open.
///

#[derive(Clone, Debug)]
pub struct IndexKeyRange<R> {
    bound_columns: usize,
    lo: RangeBound<R>,
    hi: RangeBound<R>,
    lexicographic: bool,
}

impl<R: Default> IndexKeyRange<R> {
    /// A range constraining nothing; every key column scans its full
    /// domain.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            bound_columns: 0,
            lo: RangeBound::inclusive(R::default(), ColumnSelector::EMPTY),
            hi: RangeBound::inclusive(R::default(), ColumnSelector::EMPTY),
            lexicographic: false,
        }
    }
}

impl<R> IndexKeyRange<R> {
    pub fn new(
        bound_columns: usize,
        lo: RangeBound<R>,
        hi: RangeBound<R>,
    ) -> Result<Self, EngineError> {
        Self::build(bound_columns, lo, hi, false)
    }

    /// MySQL-style partial-key semantics: trailing unselected end columns
    /// read as "no limit" rather than as literal nulls.
    pub fn lexicographic(
        bound_columns: usize,
        lo: RangeBound<R>,
        hi: RangeBound<R>,
    ) -> Result<Self, EngineError> {
        Self::build(bound_columns, lo, hi, true)
    }

    fn build(
        bound_columns: usize,
        lo: RangeBound<R>,
        hi: RangeBound<R>,
        lexicographic: bool,
    ) -> Result<Self, EngineError> {
        if bound_columns == 0 {
            return Err(EngineError::invalid_bound(
                ErrorOrigin::Cursor,
                "key range requires at least one bound column",
            ));
        }

        if bound_columns > MAX_KEY_COLUMNS {
            return Err(EngineError::invalid_bound(
                ErrorOrigin::Cursor,
                format!("key range binds {bound_columns} columns (limit {MAX_KEY_COLUMNS})"),
            ));
        }

        Ok(Self {
            bound_columns,
            lo,
            hi,
            lexicographic,
        })
    }

    #[must_use]
    pub const fn bound_columns(&self) -> usize {
        self.bound_columns
    }

    #[must_use]
    pub const fn lo(&self) -> &RangeBound<R> {
        &self.lo
    }

    #[must_use]
    pub const fn hi(&self) -> &RangeBound<R> {
        &self.hi
    }

    #[must_use]
    pub const fn is_lexicographic(&self) -> bool {
        self.lexicographic
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.bound_columns == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnSelector, IndexKeyRange, RangeBound};
    use crate::{MAX_KEY_COLUMNS, error::ErrorClass, row::Row, value::Value};

    fn bound(values: Vec<Value>, selected: usize) -> RangeBound<Row> {
        RangeBound::inclusive(Row::new(values), ColumnSelector::leading(selected))
    }

    #[test]
    fn selector_tracks_individual_columns() {
        let selector = ColumnSelector::single(0).with(2);

        assert!(selector.contains(0));
        assert!(!selector.contains(1));
        assert!(selector.contains(2));
        assert_eq!(selector.count(), 2);

        assert!(ColumnSelector::EMPTY.is_empty());
        assert_eq!(ColumnSelector::leading(3).count(), 3);
        assert!(!ColumnSelector::leading(3).contains(3));
    }

    #[test]
    fn range_requires_at_least_one_bound_column() {
        let err = IndexKeyRange::new(
            0,
            bound(vec![], 0),
            bound(vec![], 0),
        )
        .expect_err("zero bound columns should be rejected");

        assert_eq!(err.class, ErrorClass::InvalidBound);
    }

    #[test]
    fn range_rejects_more_columns_than_the_key_width_cap() {
        let err = IndexKeyRange::new(
            MAX_KEY_COLUMNS + 1,
            bound(vec![Value::Int(1)], 1),
            bound(vec![Value::Int(1)], 1),
        )
        .expect_err("over-wide range should be rejected");

        assert_eq!(err.class, ErrorClass::InvalidBound);
    }

    #[test]
    fn unbounded_range_constrains_nothing() {
        let range = IndexKeyRange::<Row>::unbounded();

        assert!(range.is_unbounded());
        assert_eq!(range.bound_columns(), 0);
        assert!(!range.is_lexicographic());
    }
}
