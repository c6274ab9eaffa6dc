use crate::value::{Collation, ValueType};
use serde::{Deserialize, Serialize};

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }
}

///
/// SortColumn
///
/// One ordering column: which row field it reads, the declared type, the
/// traversal direction, and the text collation.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortColumn {
    pub field: usize,
    pub value_type: ValueType,
    pub direction: Direction,
    pub collation: Collation,
}

impl SortColumn {
    #[must_use]
    pub const fn asc(field: usize, value_type: ValueType) -> Self {
        Self {
            field,
            value_type,
            direction: Direction::Asc,
            collation: Collation::Binary,
        }
    }

    #[must_use]
    pub const fn desc(field: usize, value_type: ValueType) -> Self {
        Self {
            field,
            value_type,
            direction: Direction::Desc,
            collation: Collation::Binary,
        }
    }

    #[must_use]
    pub const fn with_collation(mut self, collation: Collation) -> Self {
        self.collation = collation;
        self
    }
}

///
/// SortOrdering
///
/// Immutable per scan. The external sorter derives an all-ascending copy
/// of it for reading back the keys it materializes.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortOrdering(Vec<SortColumn>);

impl SortOrdering {
    #[must_use]
    pub const fn new(columns: Vec<SortColumn>) -> Self {
        Self(columns)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SortColumn> {
        self.0.get(index)
    }

    #[must_use]
    pub fn columns(&self) -> &[SortColumn] {
        &self.0
    }

    /// The single shared direction, or `None` when directions are mixed.
    #[must_use]
    pub fn uniform_direction(&self) -> Option<Direction> {
        let first = self.0.first()?.direction;
        self.0
            .iter()
            .all(|column| column.direction == first)
            .then_some(first)
    }
}

impl From<Vec<SortColumn>> for SortOrdering {
    fn from(columns: Vec<SortColumn>) -> Self {
        Self::new(columns)
    }
}
