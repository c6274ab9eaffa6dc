//! Module: codec::scalar
//! Responsibility: fixed-width scalar byte transforms preserving order.
//! Does not own: segment framing or tag assignment.
//! Boundary: internal helpers for ordered segment encoding and decoding.

pub(super) const fn ordered_i32_bytes(value: i32) -> [u8; 4] {
    let biased = value.cast_unsigned() ^ (1u32 << 31);
    biased.to_be_bytes()
}

pub(super) const fn ordered_i64_bytes(value: i64) -> [u8; 8] {
    let biased = value.cast_unsigned() ^ (1u64 << 63);
    biased.to_be_bytes()
}

pub(super) const fn i32_from_ordered(bytes: [u8; 4]) -> i32 {
    let biased = u32::from_be_bytes(bytes) ^ (1u32 << 31);
    biased.cast_signed()
}

pub(super) const fn i64_from_ordered(bytes: [u8; 8]) -> i64 {
    let biased = u64::from_be_bytes(bytes) ^ (1u64 << 63);
    biased.cast_signed()
}

// Positive floats get the sign bit set, negative floats are fully inverted,
// so the unsigned byte order matches `f64::total_cmp`.
pub(super) const fn ordered_f64_bytes(value: f64) -> [u8; 8] {
    let bits = value.to_bits();
    let ordered = if bits & 0x8000_0000_0000_0000 == 0 {
        bits ^ 0x8000_0000_0000_0000
    } else {
        !bits
    };

    ordered.to_be_bytes()
}

pub(super) const fn f64_from_ordered(bytes: [u8; 8]) -> f64 {
    let ordered = u64::from_be_bytes(bytes);
    let bits = if ordered & 0x8000_0000_0000_0000 == 0 {
        !ordered
    } else {
        ordered ^ 0x8000_0000_0000_0000
    };

    f64::from_bits(bits)
}
