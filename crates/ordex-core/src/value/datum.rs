use crate::value::{
    Collation, Date, Decimal, Float64, Time, Timestamp, ValueType, compare::cmp_int_uint,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Scalar
///
/// Typed payload of the newer value system. Carries no null state; a
/// nullable slot is a [`Datum`].
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Scalar {
    Bool(bool),
    Bytes(#[serde(with = "serde_bytes")] Vec<u8>),
    Date(Date),
    Decimal(Decimal),
    Float(Float64),
    Int(i64),
    Text(String),
    Time(Time),
    Timestamp(Timestamp),
    Uint(u64),
}

impl Scalar {
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Bytes(_) => ValueType::Bytes,
            Self::Date(_) => ValueType::Date,
            Self::Decimal(_) => ValueType::Decimal,
            Self::Float(_) => ValueType::Float,
            Self::Int(_) => ValueType::Int,
            Self::Text(_) => ValueType::Text,
            Self::Time(_) => ValueType::Time,
            Self::Timestamp(_) => ValueType::Timestamp,
            Self::Uint(_) => ValueType::Uint,
        }
    }

    /// Collation-aware comparison for matching variants; `None` for
    /// mismatched payloads (the typed system never mixes variants within
    /// one column, so `None` signals an upstream bug).
    #[must_use]
    pub fn compare(collation: Collation, left: &Self, right: &Self) -> Option<Ordering> {
        match (left, right) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Bytes(a), Self::Bytes(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Decimal(a), Self::Decimal(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Uint(b)) => Some(cmp_int_uint(*a, *b)),
            (Self::Uint(a), Self::Int(b)) => Some(cmp_int_uint(*b, *a).reverse()),
            (Self::Text(a), Self::Text(b)) => {
                Some(collation.fold(a).as_ref().cmp(collation.fold(b).as_ref()))
            }
            (Self::Time(a), Self::Time(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            (Self::Uint(a), Self::Uint(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

///
/// Datum
///
/// One statically-typed value slot. `None` is the SQL NULL; the declared
/// type lives in the row shape, not here.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Datum(Option<Scalar>);

impl Datum {
    pub const NULL: Self = Self(None);

    #[must_use]
    pub const fn new(scalar: Scalar) -> Self {
        Self(Some(scalar))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub const fn scalar(&self) -> Option<&Scalar> {
        self.0.as_ref()
    }

    #[must_use]
    pub const fn int(value: i64) -> Self {
        Self::new(Scalar::Int(value))
    }

    #[must_use]
    pub const fn uint(value: u64) -> Self {
        Self::new(Scalar::Uint(value))
    }

    #[must_use]
    pub fn float(value: f64) -> Option<Self> {
        Float64::try_new(value).map(|f| Self::new(Scalar::Float(f)))
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(Scalar::Text(value.into()))
    }

    #[must_use]
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::new(Scalar::Bytes(value.into()))
    }
}

impl From<Scalar> for Datum {
    fn from(scalar: Scalar) -> Self {
        Self::new(scalar)
    }
}
