use crate::{
    codec::{
        CodecError, KeyBuf, KeySentinel, SortCodec, shape_mismatch,
        segment::{self, ScalarView},
    },
    error::EngineError,
    ordering::SortColumn,
    row::{RowShape, TypedRow},
    serialize,
    value::{Datum, Scalar},
};
use std::cmp::Ordering;

///
/// DatumCodec
///
/// Sort codec over the statically-typed `TypedRow` representation. The
/// type system already guarantees payloads match their declared column
/// types, so any mismatch observed here is a logic bug upstream, not a
/// data condition.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DatumCodec;

impl SortCodec for DatumCodec {
    type Value = Datum;
    type Row = TypedRow;

    fn value_at<'r>(&self, row: &'r TypedRow, field: usize) -> Result<&'r Datum, CodecError> {
        row.get(field).ok_or(CodecError::FieldOutOfRange {
            field,
            arity: row.len(),
        })
    }

    fn null_value(&self) -> Datum {
        Datum::NULL
    }

    fn is_null(&self, value: &Datum) -> bool {
        value.is_null()
    }

    fn append_value(
        &self,
        key: &mut KeyBuf,
        value: &Datum,
        column: &SortColumn,
    ) -> Result<(), CodecError> {
        let Some(scalar) = value.scalar() else {
            key.push_sentinel(KeySentinel::Null);
            return Ok(());
        };

        let view = lower(scalar, column)?;
        segment::append(key.bytes_mut(), view, column.collation)
    }

    fn compare(
        &self,
        column: &SortColumn,
        left: &Datum,
        right: &Datum,
    ) -> Result<Ordering, CodecError> {
        match (left.scalar(), right.scalar()) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Less),
            (Some(_), None) => Ok(Ordering::Greater),
            (Some(a), Some(b)) => Scalar::compare(column.collation, a, b).ok_or_else(|| {
                let actual = if a.value_type() == column.value_type {
                    b.value_type()
                } else {
                    a.value_type()
                };

                CodecError::DatumTypeInvariant {
                    expected: column.value_type,
                    actual,
                }
            }),
        }
    }

    fn encode_row(&self, row: &TypedRow) -> Result<Vec<u8>, EngineError> {
        serialize::serialize(row).map_err(EngineError::from)
    }

    fn decode_row(&self, bytes: &[u8], shape: &RowShape) -> Result<TypedRow, EngineError> {
        let row: TypedRow = serialize::deserialize(bytes)?;
        if !row.matches_shape(shape) {
            return Err(shape_mismatch());
        }

        Ok(row)
    }
}

fn lower<'v>(scalar: &'v Scalar, column: &SortColumn) -> Result<ScalarView<'v>, CodecError> {
    if scalar.value_type() != column.value_type {
        return Err(CodecError::DatumTypeInvariant {
            expected: column.value_type,
            actual: scalar.value_type(),
        });
    }

    let view = match scalar {
        Scalar::Bool(v) => ScalarView::Bool(*v),
        Scalar::Bytes(v) => ScalarView::Bytes(v),
        Scalar::Date(v) => ScalarView::Date(*v),
        Scalar::Decimal(v) => ScalarView::Decimal(*v),
        Scalar::Float(v) => ScalarView::Float(*v),
        Scalar::Int(v) => ScalarView::Int(*v),
        Scalar::Text(v) => ScalarView::Text(v),
        Scalar::Time(v) => ScalarView::Time(*v),
        Scalar::Timestamp(v) => ScalarView::Timestamp(*v),
        Scalar::Uint(v) => ScalarView::Uint(*v),
    };

    Ok(view)
}
