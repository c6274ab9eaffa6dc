use derive_more::Display;
use rust_decimal::Decimal as WrappedDecimal;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

///
/// Float64
///
/// Finite-only double wrapper. NaN is rejected at construction so every
/// stored float participates in a total order (`total_cmp`, which also
/// keeps -0.0 below +0.0, matching the encoded byte order).
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[repr(transparent)]
pub struct Float64(f64);

impl Float64 {
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub fn try_new(value: f64) -> Option<Self> {
        if value.is_nan() { None } else { Some(Self(value)) }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Float64 {}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Float64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Float64> for f64 {
    fn from(value: Float64) -> Self {
        value.get()
    }
}

///
/// DecimalParts
///
/// Canonical decomposition of a Decimal.
///
/// Invariant:
/// - value == mantissa * 10^-scale
/// - mantissa carries the sign
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecimalParts {
    pub mantissa: i128,
    pub scale: u32,
}

///
/// Decimal
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    pub const ZERO: Self = Self(WrappedDecimal::ZERO);

    #[must_use]
    pub fn new(mantissa: i64, scale: u32) -> Self {
        Self(WrappedDecimal::new(mantissa, scale))
    }

    /// Reassemble from a decomposition. `None` when the mantissa or scale
    /// falls outside the wrapped representation.
    #[must_use]
    pub fn from_parts(parts: DecimalParts) -> Option<Self> {
        WrappedDecimal::try_from_i128_with_scale(parts.mantissa, parts.scale)
            .ok()
            .map(Self)
    }

    /// Largest scale (fractional digit count) the representation admits.
    #[must_use]
    pub const fn max_supported_scale() -> u32 {
        28
    }

    #[must_use]
    pub fn parts(&self) -> DecimalParts {
        DecimalParts {
            mantissa: self.0.mantissa(),
            scale: self.0.scale(),
        }
    }

    /// Strip trailing fractional zeros so equal values share one
    /// mantissa/scale form. The ordered key encoder depends on this.
    #[must_use]
    pub fn normalize(&self) -> Self {
        Self(self.0.normalize())
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub const fn is_sign_negative(&self) -> bool {
        self.0.is_sign_negative()
    }
}

///
/// Date
/// (days since the Unix epoch)
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[repr(transparent)]
pub struct Date(i32);

impl Date {
    #[must_use]
    pub const fn new(days: i32) -> Self {
        Self(days)
    }

    #[must_use]
    pub const fn days(self) -> i32 {
        self.0
    }
}

///
/// Time
/// (microseconds from midnight; negative values are admitted, matching
/// MySQL TIME semantics)
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[repr(transparent)]
pub struct Time(i64);

impl Time {
    #[must_use]
    pub const fn new(micros: i64) -> Self {
        Self(micros)
    }

    #[must_use]
    pub const fn micros(self) -> i64 {
        self.0
    }
}

///
/// Timestamp
/// (microseconds since the Unix epoch, UTC)
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[repr(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[must_use]
    pub const fn new(micros: i64) -> Self {
        Self(micros)
    }

    #[must_use]
    pub const fn micros(self) -> i64 {
        self.0
    }
}
