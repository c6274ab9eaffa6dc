//! Ordered key codec: value segments whose unsigned byte order equals the
//! declared value order, with NULL below every non-null value. Two codec
//! variants cover the two row representations and produce identical bytes
//! for equal logical values.

mod decode;
mod legacy;
mod scalar;
mod segment;
mod typed;


pub use decode::decode_segment;
pub use legacy::ValueCodec;
pub use segment::KeySentinel;
pub use typed::DatumCodec;

pub(crate) use segment::segment_end;

use crate::{
    error::{EngineError, ErrorClass, ErrorOrigin},
    ordering::SortColumn,
    row::RowShape,
    value::ValueType,
};
use std::cmp::Ordering;
use thiserror::Error as ThisError;

/// Hard cap on one text/bytes payload inside a key segment.
pub const MAX_SEGMENT_BYTES: usize = u16::MAX as usize;

///
/// CodecError
///
/// Encoding, comparison, and key-decoding failures for one value segment.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CodecError {
    #[error("value type mismatch: column is {expected}, value is {actual}")]
    TypeMismatch {
        expected: ValueType,
        actual: &'static str,
    },

    #[error("datum payload is {actual} under a column declared {expected}")]
    DatumTypeInvariant {
        expected: ValueType,
        actual: ValueType,
    },

    #[error("integer {value} is not representable under column type {expected}")]
    IntOutOfRange { value: i128, expected: ValueType },

    #[error("ordering field {field} is outside the row arity {arity}")]
    FieldOutOfRange { field: usize, arity: usize },

    #[error("key segment exceeds max length: {len} bytes (limit {max})")]
    SegmentTooLarge { len: usize, max: usize },

    #[error("decimal exponent overflow during ordered encoding")]
    DecimalExponentOverflow,

    #[error("fixed-equality bound differs between lo and hi")]
    UnequalFixedBound,

    #[error("key segment opens with unknown tag {tag:#04x}")]
    UnknownTag { tag: u8 },

    #[error("key segment is truncated")]
    TruncatedSegment,

    #[error("corrupt key segment: {detail}")]
    CorruptPayload { detail: &'static str },
}

impl From<CodecError> for EngineError {
    fn from(err: CodecError) -> Self {
        let class = match &err {
            CodecError::TypeMismatch { .. }
            | CodecError::IntOutOfRange { .. }
            | CodecError::SegmentTooLarge { .. }
            | CodecError::DecimalExponentOverflow => ErrorClass::Unsupported,
            CodecError::DatumTypeInvariant { .. } | CodecError::FieldOutOfRange { .. } => {
                ErrorClass::InvariantViolation
            }
            CodecError::UnequalFixedBound => ErrorClass::InvalidBound,
            // Undecodable key bytes mean the stored data is corrupt.
            CodecError::UnknownTag { .. }
            | CodecError::TruncatedSegment
            | CodecError::CorruptPayload { .. } => ErrorClass::Storage,
        };

        Self::new(class, ErrorOrigin::Codec, err.to_string())
    }
}

///
/// KeyBuf
///
/// Owned key-assembly buffer the codec appends segments onto. Scans keep
/// their position inside the store handle; this buffer is for composing
/// probes and sort keys outside it.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyBuf(Vec<u8>);

impl KeyBuf {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn clear(&mut self) {
        self.0.clear();
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
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub fn extend_from(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    /// Append `bytes` with every bit flipped. Inverted segments reverse
    /// their byte order, which is how descending sort columns ride an
    /// ascending store.
    pub fn append_inverted(&mut self, bytes: &[u8]) {
        segment::push_inverted(&mut self.0, bytes);
    }

    pub fn push_sentinel(&mut self, sentinel: KeySentinel) {
        self.0.push(sentinel.byte());
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut Vec<u8> {
        &mut self.0
    }
}

impl AsRef<[u8]> for KeyBuf {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

///
/// SortCodec
///
/// Strategy seam between the cursor/sorter machinery and one row
/// representation. Chosen once per scan; both implementations lower onto
/// the same segment encoder, so equal logical values encode to equal
/// bytes regardless of variant.
///

pub trait SortCodec {
    type Value: Clone;
    type Row;

    /// Fetch the value an ordering column reads from `row`.
    fn value_at<'r>(&self, row: &'r Self::Row, field: usize) -> Result<&'r Self::Value, CodecError>;

    /// The representation's NULL. Bound columns an index range leaves
    /// unselected present as this value.
    fn null_value(&self) -> Self::Value;

    fn is_null(&self, value: &Self::Value) -> bool;

    /// Append one encoded segment onto `key`. NULL encodes as the
    /// one-byte null segment.
    fn append_value(
        &self,
        key: &mut KeyBuf,
        value: &Self::Value,
        column: &SortColumn,
    ) -> Result<(), CodecError>;

    /// Value comparison under the column's declared type and collation,
    /// with NULL below every non-null value. Agrees with the encoded
    /// byte order.
    fn compare(
        &self,
        column: &SortColumn,
        left: &Self::Value,
        right: &Self::Value,
    ) -> Result<Ordering, CodecError>;

    /// Validate the fixed-equality prefix rule for one column: lo and hi
    /// must be both null or equal.
    fn check_equality(
        &self,
        column: &SortColumn,
        lo: &Self::Value,
        hi: &Self::Value,
    ) -> Result<(), CodecError> {
        match (self.is_null(lo), self.is_null(hi)) {
            (true, true) => Ok(()),
            (false, false) => {
                if self.compare(column, lo, hi)? == Ordering::Equal {
                    Ok(())
                } else {
                    Err(CodecError::UnequalFixedBound)
                }
            }
            _ => Err(CodecError::UnequalFixedBound),
        }
    }

    /// Encode a full row as the sorter's stored record.
    fn encode_row(&self, row: &Self::Row) -> Result<Vec<u8>, EngineError>;

    /// Decode a stored record back into a row and check it against the
    /// declared shape.
    fn decode_row(&self, bytes: &[u8], shape: &RowShape) -> Result<Self::Row, EngineError>;
}

pub(super) fn shape_mismatch() -> EngineError {
    EngineError::storage(
        ErrorOrigin::Serialize,
        "decoded row does not match the declared shape",
    )
}
