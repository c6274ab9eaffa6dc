use crate::{
    codec::{
        CodecError, KeyBuf, KeySentinel, SortCodec, shape_mismatch,
        segment::{self, ScalarView},
    },
    error::EngineError,
    ordering::SortColumn,
    row::{Row, RowShape},
    serialize,
    value::{Value, ValueType, compare_under_type},
};
use std::cmp::Ordering;

///
/// ValueCodec
///
/// Sort codec over the legacy self-describing `Value` rows. Expression
/// evaluation hands integer literals over as either variant, so the
/// integer family coerces to the declared column type when lossless;
/// every other variant/type mismatch is refused.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ValueCodec;

impl SortCodec for ValueCodec {
    type Value = Value;
    type Row = Row;

    fn value_at<'r>(&self, row: &'r Row, field: usize) -> Result<&'r Value, CodecError> {
        row.get(field).ok_or(CodecError::FieldOutOfRange {
            field,
            arity: row.len(),
        })
    }

    fn null_value(&self) -> Value {
        Value::Null
    }

    fn is_null(&self, value: &Value) -> bool {
        value.is_null()
    }

    fn append_value(
        &self,
        key: &mut KeyBuf,
        value: &Value,
        column: &SortColumn,
    ) -> Result<(), CodecError> {
        if value.is_null() {
            key.push_sentinel(KeySentinel::Null);
            return Ok(());
        }

        let view = lower(value, column.value_type)?;
        segment::append(key.bytes_mut(), view, column.collation)
    }

    fn compare(
        &self,
        column: &SortColumn,
        left: &Value,
        right: &Value,
    ) -> Result<Ordering, CodecError> {
        match (left.is_null(), right.is_null()) {
            (true, true) => Ok(Ordering::Equal),
            (true, false) => Ok(Ordering::Less),
            (false, true) => Ok(Ordering::Greater),
            (false, false) => compare_under_type(column.value_type, column.collation, left, right)
                .ok_or(CodecError::TypeMismatch {
                    expected: column.value_type,
                    actual: left.type_label(),
                }),
        }
    }

    fn encode_row(&self, row: &Row) -> Result<Vec<u8>, EngineError> {
        serialize::serialize(row).map_err(EngineError::from)
    }

    fn decode_row(&self, bytes: &[u8], shape: &RowShape) -> Result<Row, EngineError> {
        let row: Row = serialize::deserialize(bytes)?;
        if !row.matches_shape(shape) {
            return Err(shape_mismatch());
        }

        Ok(row)
    }
}

fn lower(value: &Value, declared: ValueType) -> Result<ScalarView<'_>, CodecError> {
    let view = match (declared, value) {
        (ValueType::Bool, Value::Bool(v)) => ScalarView::Bool(*v),
        (ValueType::Bytes, Value::Bytes(v)) => ScalarView::Bytes(v),
        (ValueType::Date, Value::Date(v)) => ScalarView::Date(*v),
        (ValueType::Decimal, Value::Decimal(v)) => ScalarView::Decimal(*v),
        (ValueType::Float, Value::Float(v)) => ScalarView::Float(*v),
        (ValueType::Int, Value::Int(v)) => ScalarView::Int(*v),
        (ValueType::Int, Value::Uint(v)) => {
            let narrowed = i64::try_from(*v).map_err(|_| CodecError::IntOutOfRange {
                value: i128::from(*v),
                expected: declared,
            })?;
            ScalarView::Int(narrowed)
        }
        (ValueType::Uint, Value::Uint(v)) => ScalarView::Uint(*v),
        (ValueType::Uint, Value::Int(v)) => {
            let widened = u64::try_from(*v).map_err(|_| CodecError::IntOutOfRange {
                value: i128::from(*v),
                expected: declared,
            })?;
            ScalarView::Uint(widened)
        }
        (ValueType::Text, Value::Text(v)) => ScalarView::Text(v),
        (ValueType::Time, Value::Time(v)) => ScalarView::Time(*v),
        (ValueType::Timestamp, Value::Timestamp(v)) => ScalarView::Timestamp(*v),
        _ => {
            return Err(CodecError::TypeMismatch {
                expected: declared,
                actual: value.type_label(),
            });
        }
    };

    Ok(view)
}
