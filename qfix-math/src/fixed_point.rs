use core::fmt;
use core::marker::PhantomData;

use thiserror::Error;

use crate::format::{DefaultFormat, FormatInfo, QFormat};
use crate::storage::Storage;

/// Signed fixed-point number in format `Q`.
///
/// The value is `raw / 2^Q::FRAC_BITS`. Conversion from a float rounds to
/// nearest, so `to_float(from_float(x))` is within half a resolution unit
/// (`2^-(FRAC_BITS + 1)`) of `x` for any `x` inside the format's range and
/// saturates outside it.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed<Q: QFormat = DefaultFormat> {
    raw: Q::Storage,
    _format: PhantomData<Q>,
}

/// Default-format scalar.
pub type Scalar = Fixed<DefaultFormat>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixedPointError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Square root of a negative value (raw {0})")]
    NegativeSqrt(i64),
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },
}

pub type Result<T> = std::result::Result<T, FixedPointError>;

impl<Q: QFormat> Fixed<Q> {
    const FORMAT_CHECK: () = assert!(
        Q::FRAC_BITS + 1 < <Q::Storage as Storage>::BITS,
        "Q format needs at least one sign bit and one integer bit"
    );

    #[inline]
    pub fn from_raw(raw: Q::Storage) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FORMAT_CHECK;
        Self { raw, _format: PhantomData }
    }

    #[inline]
    pub fn raw(self) -> Q::Storage {
        self.raw
    }

    /// Convert from `f64` with round-to-nearest; saturates out of range.
    #[inline]
    pub fn from_float(x: f64) -> Self {
        Self::from_raw(<Q::Storage as Storage>::from_f64_scaled(x, Q::FRAC_BITS))
    }

    #[inline]
    pub fn to_float(self) -> f64 {
        self.raw.to_f64_scaled(Q::FRAC_BITS)
    }

    #[inline]
    pub fn from_f32(x: f32) -> Self {
        Self::from_float(x as f64)
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_float() as f32
    }

    /// `i << FRAC_BITS`. Integers outside the range wrap.
    #[inline]
    pub fn from_int(i: i64) -> Self {
        Self::from_raw(<Q::Storage as Storage>::from_int_shl(i, Q::FRAC_BITS))
    }

    /// Integer part, rounded toward negative infinity.
    #[inline]
    pub fn to_int(self) -> i64 {
        self.raw.to_int_shr(Q::FRAC_BITS)
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_raw(<Q::Storage as Storage>::ZERO)
    }

    #[inline]
    pub fn one() -> Self {
        Self::from_int(1)
    }

    #[inline]
    pub fn minus_one() -> Self {
        Self::from_int(-1)
    }

    #[inline]
    pub fn two() -> Self {
        Self::from_int(2)
    }

    #[inline]
    pub fn half() -> Self {
        Self::from_float(0.5)
    }

    #[inline]
    pub fn pi() -> Self {
        Self::from_float(core::f64::consts::PI)
    }

    #[inline]
    pub fn two_pi() -> Self {
        Self::from_float(core::f64::consts::TAU)
    }

    #[inline]
    pub fn half_pi() -> Self {
        Self::from_float(core::f64::consts::FRAC_PI_2)
    }

    #[inline]
    pub fn max_value() -> Self {
        Self::from_raw(<Q::Storage as Storage>::MAX)
    }

    #[inline]
    pub fn min_value() -> Self {
        Self::from_raw(<Q::Storage as Storage>::MIN)
    }

    /// Smallest positive value (one raw unit).
    #[inline]
    pub fn epsilon() -> Self {
        Self::from_raw(<Q::Storage as Storage>::from_int_shl(1, 0))
    }

    /// Resolution `2^-FRAC_BITS` as a float.
    #[inline]
    pub fn resolution() -> f64 {
        (-(Q::FRAC_BITS as f64)).exp2()
    }

    pub fn format_info() -> FormatInfo {
        FormatInfo::of::<Q>()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.raw == <Q::Storage as Storage>::ZERO
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.raw < <Q::Storage as Storage>::ZERO
    }
}

impl<Q: QFormat> fmt::Display for Fixed<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.to_float())
    }
}

impl<Q: QFormat> fmt::Debug for Fixed<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fixed")
            .field("format", &Q::NAME)
            .field("raw", &self.raw)
            .field("value", &self.to_float())
            .finish()
    }
}

impl<Q: QFormat> zeroize::DefaultIsZeroes for Fixed<Q> {}
