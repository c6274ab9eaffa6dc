use crate::value::{Datum, Value, ValueType};
use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};

///
/// RowShape
///
/// Field count + declared types of a row stream. Carried beside the codec;
/// the codec itself is stateless.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RowShape(Vec<ValueType>);

impl RowShape {
    #[must_use]
    pub const fn new(types: Vec<ValueType>) -> Self {
        Self(types)
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
    pub fn get(&self, index: usize) -> Option<ValueType> {
        self.0.get(index).copied()
    }

    #[must_use]
    pub fn types(&self) -> &[ValueType] {
        &self.0
    }
}

///
/// Row
///
/// Legacy expression-evaluated row: self-describing values, positional
/// access.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, From, PartialEq, Serialize)]
pub struct Row(Vec<Value>);

impl Row {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Shape check used when a row envelope is decoded: arity must match,
    /// and each non-null value must be interpretable under the declared
    /// type (the integer family cross-matches).
    #[must_use]
    pub fn matches_shape(&self, shape: &RowShape) -> bool {
        self.0.len() == shape.len()
            && self.0.iter().zip(shape.types()).all(|(value, ty)| {
                value.is_null() || value_fits_type(value, *ty)
            })
    }
}

fn value_fits_type(value: &Value, ty: ValueType) -> bool {
    match ty {
        ValueType::Int | ValueType::Uint => {
            matches!(value, Value::Int(_) | Value::Uint(_))
        }
        ValueType::Bool => matches!(value, Value::Bool(_)),
        ValueType::Bytes => matches!(value, Value::Bytes(_)),
        ValueType::Date => matches!(value, Value::Date(_)),
        ValueType::Decimal => matches!(value, Value::Decimal(_)),
        ValueType::Float => matches!(value, Value::Float(_)),
        ValueType::Text => matches!(value, Value::Text(_)),
        ValueType::Time => matches!(value, Value::Time(_)),
        ValueType::Timestamp => matches!(value, Value::Timestamp(_)),
    }
}

///
/// TypedRow
///
/// Row of the newer statically-typed value system.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, From, PartialEq, Serialize)]
pub struct TypedRow(Vec<Datum>);

impl TypedRow {
    #[must_use]
    pub const fn new(data: Vec<Datum>) -> Self {
        Self(data)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Datum> {
        self.0.get(index)
    }

    #[must_use]
    pub fn matches_shape(&self, shape: &RowShape) -> bool {
        self.0.len() == shape.len()
            && self.0.iter().zip(shape.types()).all(|(datum, ty)| {
                datum
                    .scalar()
                    .is_none_or(|scalar| scalar.value_type() == *ty)
            })
    }
}
