use crate::{
    codec::{CodecError, scalar, segment},
    value::{Date, Decimal, DecimalParts, Float64, Scalar, Time, Timestamp},
};

/// Decode the segment starting at `start`. `None` is the null segment.
/// Returns the value and the offset one past the segment.
pub fn decode_segment(
    key: &[u8],
    start: usize,
) -> Result<(Option<Scalar>, usize), CodecError> {
    let tag = *key.get(start).ok_or(CodecError::TruncatedSegment)?;
    let payload = start.saturating_add(1);

    match tag {
        segment::NULL_TAG => Ok((None, payload)),
        segment::TAG_BOOL => {
            let value = match key.get(payload) {
                Some(0) => false,
                Some(1) => true,
                Some(_) => {
                    return Err(CodecError::CorruptPayload {
                        detail: "bool segment byte is not 0 or 1",
                    });
                }
                None => return Err(CodecError::TruncatedSegment),
            };

            Ok((Some(Scalar::Bool(value)), payload + 1))
        }
        segment::TAG_INT => {
            let bytes = fixed_payload::<8>(key, payload)?;
            let value = Scalar::Int(scalar::i64_from_ordered(bytes));
            Ok((Some(value), payload + 8))
        }
        segment::TAG_UINT => {
            let bytes = fixed_payload::<8>(key, payload)?;
            Ok((Some(Scalar::Uint(u64::from_be_bytes(bytes))), payload + 8))
        }
        segment::TAG_FLOAT => {
            let bytes = fixed_payload::<8>(key, payload)?;
            let value =
                Float64::try_new(scalar::f64_from_ordered(bytes)).ok_or(CodecError::CorruptPayload {
                    detail: "float segment decodes to NaN",
                })?;

            Ok((Some(Scalar::Float(value)), payload + 8))
        }
        segment::TAG_DECIMAL => decode_decimal(key, payload),
        segment::TAG_TEXT => {
            let (bytes, end) = segment::read_terminated_bytes(key, payload)?;
            let text = String::from_utf8(bytes).map_err(|_| CodecError::CorruptPayload {
                detail: "text segment is not valid UTF-8",
            })?;

            Ok((Some(Scalar::Text(text)), end))
        }
        segment::TAG_BYTES => {
            let (bytes, end) = segment::read_terminated_bytes(key, payload)?;
            Ok((Some(Scalar::Bytes(bytes)), end))
        }
        segment::TAG_DATE => {
            let bytes = fixed_payload::<4>(key, payload)?;
            let value = Scalar::Date(Date::new(scalar::i32_from_ordered(bytes)));
            Ok((Some(value), payload + 4))
        }
        segment::TAG_TIME => {
            let bytes = fixed_payload::<8>(key, payload)?;
            let value = Scalar::Time(Time::new(scalar::i64_from_ordered(bytes)));
            Ok((Some(value), payload + 8))
        }
        segment::TAG_TIMESTAMP => {
            let bytes = fixed_payload::<8>(key, payload)?;
            let value = Scalar::Timestamp(Timestamp::new(scalar::i64_from_ordered(bytes)));
            Ok((Some(value), payload + 8))
        }
        other => Err(CodecError::UnknownTag { tag: other }),
    }
}

fn fixed_payload<const N: usize>(key: &[u8], start: usize) -> Result<[u8; N], CodecError> {
    let end = start.checked_add(N).ok_or(CodecError::TruncatedSegment)?;

    key.get(start..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(CodecError::TruncatedSegment)
}

// `start` points at the sign marker. Encoding normalizes first, so the
// decoded value carries the normalized mantissa/scale form.
fn decode_decimal(key: &[u8], start: usize) -> Result<(Option<Scalar>, usize), CodecError> {
    let marker = *key.get(start).ok_or(CodecError::TruncatedSegment)?;
    if marker == segment::DECIMAL_ZERO_MARKER {
        return Ok((Some(Scalar::Decimal(Decimal::ZERO)), start + 1));
    }

    let negative = match marker {
        segment::DECIMAL_POSITIVE_MARKER => false,
        segment::DECIMAL_NEGATIVE_MARKER => true,
        _ => {
            return Err(CodecError::CorruptPayload {
                detail: "decimal segment has an unknown sign marker",
            });
        }
    };

    let mut exponent_bytes = fixed_payload::<4>(key, start + 1)?;
    if negative {
        for byte in &mut exponent_bytes {
            *byte = !*byte;
        }
    }
    let exponent = scalar::i32_from_ordered(exponent_bytes);

    let terminator = if negative {
        segment::DECIMAL_NEGATIVE_TERMINATOR
    } else {
        segment::DECIMAL_POSITIVE_TERMINATOR
    };

    let digits_start = start + 1 + 4;
    let mut idx = digits_start;
    let mut magnitude = 0u128;

    loop {
        let byte = *key.get(idx).ok_or(CodecError::TruncatedSegment)?;
        if byte == terminator {
            break;
        }

        let raw = if negative { !byte } else { byte };
        if !raw.is_ascii_digit() {
            return Err(CodecError::CorruptPayload {
                detail: "decimal digit byte outside ASCII range",
            });
        }

        magnitude = magnitude
            .checked_mul(10)
            .and_then(|shifted| shifted.checked_add(u128::from(raw - b'0')))
            .ok_or(CodecError::CorruptPayload {
                detail: "decimal mantissa overflows the representation",
            })?;
        idx += 1;
    }

    let digit_count = idx - digits_start;
    if digit_count == 0 {
        return Err(CodecError::CorruptPayload {
            detail: "decimal segment has no digits",
        });
    }

    // scale recovers from exponent = (digits - 1) - scale.
    let leading = i64::try_from(digit_count - 1).map_err(|_| CodecError::CorruptPayload {
        detail: "decimal digit count outside supported range",
    })?;
    let scale =
        u32::try_from(leading - i64::from(exponent)).map_err(|_| CodecError::CorruptPayload {
            detail: "decimal scale outside supported range",
        })?;
    if scale > Decimal::max_supported_scale() {
        return Err(CodecError::CorruptPayload {
            detail: "decimal scale outside supported range",
        });
    }

    let mantissa = i128::try_from(magnitude).map_err(|_| CodecError::CorruptPayload {
        detail: "decimal mantissa overflows the representation",
    })?;
    let mantissa = if negative { -mantissa } else { mantissa };

    let value = Decimal::from_parts(DecimalParts { mantissa, scale }).ok_or(
        CodecError::CorruptPayload {
            detail: "decimal payload outside the representable range",
        },
    )?;

    Ok((Some(Scalar::Decimal(value)), idx + 1))
}
