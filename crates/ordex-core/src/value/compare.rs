use crate::value::{Collation, Value, ValueType};
use std::cmp::Ordering;

/// Compare two non-null values under a declared column type.
///
/// Returns `None` when a variant cannot be interpreted under the declared
/// type; the codec maps that into a type-mismatch error. NULL handling is
/// deliberately not here: null-sorts-lowest is index policy and lives with
/// the codec.
#[must_use]
pub fn compare_under_type(
    ty: ValueType,
    collation: Collation,
    left: &Value,
    right: &Value,
) -> Option<Ordering> {
    match ty {
        // The integer family admits cross-variant comparison: expression
        // evaluation may hand an Int bound to a Uint column and vice versa.
        ValueType::Int | ValueType::Uint => match (left, right) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Uint(b)) => Some(cmp_int_uint(*a, *b)),
            (Value::Uint(a), Value::Int(b)) => Some(cmp_int_uint(*b, *a).reverse()),
            _ => None,
        },
        ValueType::Bool => match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        },
        ValueType::Bytes => match (left, right) {
            (Value::Bytes(a), Value::Bytes(b)) => Some(a.cmp(b)),
            _ => None,
        },
        ValueType::Date => match (left, right) {
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            _ => None,
        },
        ValueType::Decimal => match (left, right) {
            (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
            _ => None,
        },
        ValueType::Float => match (left, right) {
            (Value::Float(a), Value::Float(b)) => Some(a.cmp(b)),
            _ => None,
        },
        ValueType::Text => match (left, right) {
            (Value::Text(a), Value::Text(b)) => {
                Some(collation.fold(a).as_ref().cmp(collation.fold(b).as_ref()))
            }
            _ => None,
        },
        ValueType::Time => match (left, right) {
            (Value::Time(a), Value::Time(b)) => Some(a.cmp(b)),
            _ => None,
        },
        ValueType::Timestamp => match (left, right) {
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        },
    }
}

/// Mathematical comparison of a signed and an unsigned 64-bit integer.
#[must_use]
pub const fn cmp_int_uint(signed: i64, unsigned: u64) -> Ordering {
    if signed < 0 {
        Ordering::Less
    } else {
        let widened = signed.cast_unsigned();
        if widened < unsigned {
            Ordering::Less
        } else if widened > unsigned {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}
