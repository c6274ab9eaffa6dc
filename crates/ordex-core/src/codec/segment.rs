//! Module: codec::segment
//! Responsibility: tag assignment and payload framing for one key segment.
//! Does not own: value-representation lowering (the codec variants do that).
//! Boundary: every segment written to a store key goes through `append`.

use crate::{
    codec::{CodecError, MAX_SEGMENT_BYTES, scalar},
    value::{Collation, Date, Decimal, Float64, Time, Timestamp},
};

// One tag byte opens every segment. Tags sit strictly between the BEFORE
// and AFTER sentinels so a key prefix extended with a sentinel brackets the
// prefix's whole subtree.
pub(crate) const BEFORE_BYTE: u8 = 0x00;
pub(crate) const NULL_TAG: u8 = 0x01;
pub(crate) const AFTER_BYTE: u8 = 0xFF;

pub(super) const TAG_BOOL: u8 = 0x02;
pub(super) const TAG_INT: u8 = 0x03;
pub(super) const TAG_UINT: u8 = 0x04;
pub(super) const TAG_FLOAT: u8 = 0x05;
pub(super) const TAG_DECIMAL: u8 = 0x06;
pub(super) const TAG_TEXT: u8 = 0x07;
pub(super) const TAG_BYTES: u8 = 0x08;
pub(super) const TAG_DATE: u8 = 0x09;
pub(super) const TAG_TIME: u8 = 0x0A;
pub(super) const TAG_TIMESTAMP: u8 = 0x0B;

// Decimal payload markers bucket by sign before any digit is compared.
pub(super) const DECIMAL_NEGATIVE_MARKER: u8 = 0x00;
pub(super) const DECIMAL_ZERO_MARKER: u8 = 0x01;
pub(super) const DECIMAL_POSITIVE_MARKER: u8 = 0x02;

pub(super) const DECIMAL_POSITIVE_TERMINATOR: u8 = 0x00;
pub(super) const DECIMAL_NEGATIVE_TERMINATOR: u8 = 0xFF;

// i128::unsigned_abs never exceeds this many decimal digits.
const DECIMAL_DIGIT_CAPACITY: usize = 39;

const ORDERED_I32_LEN: usize = 4;
const ORDERED_I64_LEN: usize = 8;

///
/// KeySentinel
///
/// Non-value bytes a scan may place after a key prefix: `Before` sorts
/// under every segment of the prefix's subtree, `After` over every one,
/// and `Null` is the one-byte segment of a SQL NULL (which sorts below
/// all non-null values).
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeySentinel {
    Before,
    Null,
    After,
}

impl KeySentinel {
    #[must_use]
    pub const fn byte(self) -> u8 {
        match self {
            Self::Before => BEFORE_BYTE,
            Self::Null => NULL_TAG,
            Self::After => AFTER_BYTE,
        }
    }
}

///
/// ScalarView
///
/// Borrowed lowering both codec variants reduce their values to before
/// encoding. Equal logical values lower to the same view, which is what
/// makes the two variants byte-identical.
///

#[derive(Clone, Copy, Debug)]
pub(super) enum ScalarView<'a> {
    Bool(bool),
    Bytes(&'a [u8]),
    Date(Date),
    Decimal(Decimal),
    Float(Float64),
    Int(i64),
    Text(&'a str),
    Time(Time),
    Timestamp(Timestamp),
    Uint(u64),
}

/// Append one value segment (tag + payload) onto a key.
pub(super) fn append(
    out: &mut Vec<u8>,
    view: ScalarView<'_>,
    collation: Collation,
) -> Result<(), CodecError> {
    match view {
        ScalarView::Bool(v) => {
            out.push(TAG_BOOL);
            out.push(u8::from(v));
        }
        ScalarView::Bytes(v) => {
            push_checked_terminated(out, TAG_BYTES, v)?;
        }
        ScalarView::Date(v) => {
            out.push(TAG_DATE);
            out.extend_from_slice(&scalar::ordered_i32_bytes(v.days()));
        }
        ScalarView::Decimal(v) => {
            out.push(TAG_DECIMAL);
            push_decimal_payload(out, v)?;
        }
        ScalarView::Float(v) => {
            out.push(TAG_FLOAT);
            out.extend_from_slice(&scalar::ordered_f64_bytes(v.get()));
        }
        ScalarView::Int(v) => {
            out.push(TAG_INT);
            out.extend_from_slice(&scalar::ordered_i64_bytes(v));
        }
        ScalarView::Text(v) => {
            let folded = collation.fold(v);
            push_checked_terminated(out, TAG_TEXT, folded.as_bytes())?;
        }
        ScalarView::Time(v) => {
            out.push(TAG_TIME);
            out.extend_from_slice(&scalar::ordered_i64_bytes(v.micros()));
        }
        ScalarView::Timestamp(v) => {
            out.push(TAG_TIMESTAMP);
            out.extend_from_slice(&scalar::ordered_i64_bytes(v.micros()));
        }
        ScalarView::Uint(v) => {
            out.push(TAG_UINT);
            out.extend_from_slice(&v.to_be_bytes());
        }
    }

    Ok(())
}

/// Find the exclusive end offset of the segment starting at `start`.
///
/// Tags are self-describing, so a column boundary inside a composite key
/// can be recovered from the bytes alone. Keys hold only null and value
/// segments; a sentinel byte here means the key is corrupt.
pub(crate) fn segment_end(key: &[u8], start: usize) -> Result<usize, CodecError> {
    let tag = *key.get(start).ok_or(CodecError::TruncatedSegment)?;

    let end = match tag {
        NULL_TAG => start.saturating_add(1),
        TAG_BOOL => start.saturating_add(2),
        TAG_DATE => start.saturating_add(1 + ORDERED_I32_LEN),
        TAG_INT | TAG_UINT | TAG_FLOAT | TAG_TIME | TAG_TIMESTAMP => {
            start.saturating_add(1 + ORDERED_I64_LEN)
        }
        TAG_TEXT | TAG_BYTES => terminated_end(key, start.saturating_add(1))?,
        TAG_DECIMAL => decimal_end(key, start.saturating_add(1))?,
        other => return Err(CodecError::UnknownTag { tag: other }),
    };

    if end > key.len() {
        return Err(CodecError::TruncatedSegment);
    }

    Ok(end)
}

// Byte strings are escaped so tuple boundaries remain unambiguous.
pub(super) fn push_terminated_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        if byte == 0 {
            out.extend_from_slice(&[0, 0xFF]);
        } else {
            out.push(byte);
        }
    }

    out.extend_from_slice(&[0, 0]);
}

/// Undo `push_terminated_bytes` from `start`; returns the payload and the
/// offset one past the terminator.
pub(super) fn read_terminated_bytes(
    key: &[u8],
    start: usize,
) -> Result<(Vec<u8>, usize), CodecError> {
    let mut out = Vec::new();
    let mut idx = start;

    loop {
        let byte = *key.get(idx).ok_or(CodecError::TruncatedSegment)?;
        if byte != 0 {
            out.push(byte);
            idx += 1;
            continue;
        }

        match key.get(idx + 1) {
            Some(0xFF) => {
                out.push(0);
                idx += 2;
            }
            Some(0) => return Ok((out, idx + 2)),
            _ => return Err(CodecError::TruncatedSegment),
        }
    }
}

pub(super) fn push_inverted(out: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        out.push(!byte);
    }
}

fn push_checked_terminated(out: &mut Vec<u8>, tag: u8, bytes: &[u8]) -> Result<(), CodecError> {
    if bytes.len() > MAX_SEGMENT_BYTES {
        return Err(CodecError::SegmentTooLarge {
            len: bytes.len(),
            max: MAX_SEGMENT_BYTES,
        });
    }

    out.push(tag);
    push_terminated_bytes(out, bytes);
    Ok(())
}

// Decimal ordering is sign bucket + adjusted exponent + significant digits
// + terminator; negative payloads are bytewise inverted so the bucket
// order reverses.
pub(super) fn push_decimal_payload(out: &mut Vec<u8>, value: Decimal) -> Result<(), CodecError> {
    let normalized = value.normalize();
    if normalized.is_zero() {
        out.push(DECIMAL_ZERO_MARKER);
        return Ok(());
    }

    let parts = normalized.parts();
    let mut digits = [0u8; DECIMAL_DIGIT_CAPACITY];
    let first = write_decimal_digits(parts.mantissa.unsigned_abs(), &mut digits);
    let digit_bytes = &digits[first..];

    let exponent = decimal_ordered_exponent(parts.scale, digit_bytes.len())?;
    let exponent_bytes = scalar::ordered_i32_bytes(exponent);

    if parts.mantissa.is_negative() {
        out.push(DECIMAL_NEGATIVE_MARKER);
        push_inverted(out, &exponent_bytes);
        push_inverted(out, digit_bytes);
        out.push(DECIMAL_NEGATIVE_TERMINATOR);
    } else {
        out.push(DECIMAL_POSITIVE_MARKER);
        out.extend_from_slice(&exponent_bytes);
        out.extend_from_slice(digit_bytes);
        out.push(DECIMAL_POSITIVE_TERMINATOR);
    }

    Ok(())
}

// Fill `buf` from the back; digits occupy `buf[returned..]`.
fn write_decimal_digits(mut value: u128, buf: &mut [u8; DECIMAL_DIGIT_CAPACITY]) -> usize {
    let mut idx = DECIMAL_DIGIT_CAPACITY;

    loop {
        idx = idx.saturating_sub(1);
        let digit = u8::try_from(value % 10).expect("decimal digit should fit one byte");
        buf[idx] = b'0' + digit;
        value /= 10;

        if value == 0 {
            break;
        }
    }

    idx
}

// Power of ten of the leading digit, after trailing-zero normalization.
// Equal values then share one exponent + digit string.
fn decimal_ordered_exponent(scale: u32, digit_count: usize) -> Result<i32, CodecError> {
    let digits = u32::try_from(digit_count).map_err(|_| CodecError::DecimalExponentOverflow)?;
    let leading = digits
        .checked_sub(1)
        .ok_or(CodecError::DecimalExponentOverflow)?;

    let exponent = i64::from(leading) - i64::from(scale);
    i32::try_from(exponent).map_err(|_| CodecError::DecimalExponentOverflow)
}

// `start` points at the sign marker. Digit bytes never collide with their
// bucket's terminator, but the fixed exponent bytes can; skip them before
// scanning.
fn decimal_end(key: &[u8], start: usize) -> Result<usize, CodecError> {
    let marker = *key.get(start).ok_or(CodecError::TruncatedSegment)?;

    let terminator = match marker {
        DECIMAL_ZERO_MARKER => return Ok(start.saturating_add(1)),
        DECIMAL_POSITIVE_MARKER => DECIMAL_POSITIVE_TERMINATOR,
        DECIMAL_NEGATIVE_MARKER => DECIMAL_NEGATIVE_TERMINATOR,
        _ => {
            return Err(CodecError::CorruptPayload {
                detail: "decimal segment has an unknown sign marker",
            });
        }
    };

    let mut idx = start.saturating_add(1 + ORDERED_I32_LEN);
    loop {
        let byte = *key.get(idx).ok_or(CodecError::TruncatedSegment)?;
        if byte == terminator {
            return Ok(idx + 1);
        }
        idx += 1;
    }
}

fn terminated_end(key: &[u8], start: usize) -> Result<usize, CodecError> {
    let mut idx = start;

    loop {
        let byte = *key.get(idx).ok_or(CodecError::TruncatedSegment)?;
        if byte != 0 {
            idx += 1;
            continue;
        }

        match key.get(idx + 1) {
            Some(0xFF) => idx += 2,
            Some(0) => return Ok(idx + 2),
            _ => return Err(CodecError::TruncatedSegment),
        }
    }
}
