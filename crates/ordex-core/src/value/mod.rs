mod compare;
mod datum;
mod types;

#[cfg(test)]
mod tests;

pub use compare::{cmp_int_uint, compare_under_type};
pub use datum::{Datum, Scalar};
pub use types::{Date, Decimal, DecimalParts, Float64, Time, Timestamp};

use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

///
/// ValueType
///
/// Declared column types. Every key column carries one; the codec encodes
/// against the declared type, not the runtime variant.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ValueType {
    Bool,
    Bytes,
    Date,
    Decimal,
    Float,
    Int,
    Text,
    Time,
    Timestamp,
    Uint,
}

impl ValueType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::Date => "date",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Int => "int",
            Self::Text => "text",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Uint => "uint",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

///
/// Collation
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Collation {
    #[default]
    Binary, // codepoint order
    CaseFold, // case-insensitive
}

impl Collation {
    pub(crate) fn fold(self, s: &str) -> Cow<'_, str> {
        match self {
            Self::Binary => Cow::Borrowed(s),
            Self::CaseFold => {
                if s.is_ascii() {
                    Cow::Owned(s.to_ascii_lowercase())
                } else {
                    // Non-ASCII falls back to plain lowercasing until a
                    // real casefold (NFKC + full fold) lands.
                    Cow::Owned(s.to_lowercase())
                }
            }
        }
    }
}

///
/// Value
///
/// Legacy self-describing runtime value, produced by expression evaluation.
/// NULL is a variant here; the typed representation keeps nullability
/// outside the payload instead (see [`Datum`]).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Bytes(#[serde(with = "serde_bytes")] Vec<u8>),
    Date(Date),
    Decimal(Decimal),
    Float(Float64),
    Int(i64),
    Null,
    Text(String),
    Time(Time),
    Timestamp(Timestamp),
    Uint(u64),
}

impl Value {
    /// Finite-float constructor; `None` for NaN.
    #[must_use]
    pub fn float(value: f64) -> Option<Self> {
        Float64::try_new(value).map(Self::Float)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Variant label for error messages.
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::Decimal(_) => "decimal",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Time(_) => "time",
            Self::Timestamp(_) => "timestamp",
            Self::Uint(_) => "uint",
        }
    }
}
