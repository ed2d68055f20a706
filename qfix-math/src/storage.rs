//! Backing integer types for fixed-point values.
//!
//! Every [`Storage`] pairs a signed integer with a wide integer of twice its
//! width. Products and pre-shifted dividends are formed in the wide type and
//! narrowed back according to an [`Overflow`] policy.

use core::fmt::{Debug, Display};
use core::hash::Hash;

use rand::distributions::uniform::SampleUniform;
use serde::{Deserialize, Serialize};

/// What happens when a result does not fit back into the storage type.
///
/// This is the single policy point for range errors. `Wrap` keeps the
/// two's-complement truncation of the classic Q-format kernels; `Saturate`
/// clamps to `MIN`/`MAX` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Overflow {
    Wrap,
    Saturate,
}

mod private {
    pub trait Sealed {}
}

/// Signed integer able to hold a Q-format value.
///
/// Sealed: implemented for `i8`, `i16`, `i32` and `i64`.
pub trait Storage:
    Copy + Default + Eq + Ord + Hash + Debug + Display + Send + Sync + SampleUniform + private::Sealed + 'static
{
    /// Integer of twice the width, used for intermediates.
    type Wide: Copy + Ord + Debug;

    const BITS: u32;
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;

    /// `(a * b) >> frac` computed in the wide type.
    fn mul_shr(self, rhs: Self, frac: u32) -> Self::Wide;

    /// `(a << frac) / b` computed in the wide type. `rhs` must be non-zero.
    fn shl_div(self, rhs: Self, frac: u32) -> Self::Wide;

    fn narrow(wide: Self::Wide, overflow: Overflow) -> Self;

    /// `None` if `wide` is outside the storage range.
    fn narrow_checked(wide: Self::Wide) -> Option<Self>;

    fn add_with(self, rhs: Self, overflow: Overflow) -> Self;
    fn sub_with(self, rhs: Self, overflow: Overflow) -> Self;
    fn neg_with(self, overflow: Overflow) -> Self;
    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;

    /// `|a|` via the sign mask: `(a ^ m) - m` with `m = a >> (BITS - 1)`.
    /// `MIN` maps to itself.
    fn abs_branchless(self) -> Self;

    /// Truncating remainder (sign follows the dividend).
    fn rem_trunc(self, rhs: Self) -> Self;

    /// `floor((a + b) / 2)` without intermediate overflow.
    fn mid_floor(self, rhs: Self) -> Self;

    /// Round-to-nearest of `x * 2^frac`, saturating at the storage bounds.
    fn from_f64_scaled(x: f64, frac: u32) -> Self;
    fn to_f64_scaled(self, frac: u32) -> f64;

    /// `i << frac`, wrapping.
    fn from_int_shl(i: i64, frac: u32) -> Self;
    /// `a >> frac` (floor).
    fn to_int_shr(self, frac: u32) -> i64;

    fn as_i64(self) -> i64;
}

macro_rules! impl_storage {
    ($($t:ty => $wide:ty),* $(,)?) => {$(
        impl private::Sealed for $t {}

        impl Storage for $t {
            type Wide = $wide;

            const BITS: u32 = <$t>::BITS;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;

            #[inline]
            fn mul_shr(self, rhs: Self, frac: u32) -> $wide {
                ((self as $wide) * (rhs as $wide)) >> frac
            }

            #[inline]
            fn shl_div(self, rhs: Self, frac: u32) -> $wide {
                ((self as $wide) << frac) / (rhs as $wide)
            }

            #[inline]
            fn narrow(wide: $wide, overflow: Overflow) -> Self {
                match overflow {
                    Overflow::Wrap => wide as $t,
                    Overflow::Saturate => wide.clamp(<$t>::MIN as $wide, <$t>::MAX as $wide) as $t,
                }
            }

            #[inline]
            fn narrow_checked(wide: $wide) -> Option<Self> {
                <$t>::try_from(wide).ok()
            }

            #[inline]
            fn add_with(self, rhs: Self, overflow: Overflow) -> Self {
                match overflow {
                    Overflow::Wrap => self.wrapping_add(rhs),
                    Overflow::Saturate => self.saturating_add(rhs),
                }
            }

            #[inline]
            fn sub_with(self, rhs: Self, overflow: Overflow) -> Self {
                match overflow {
                    Overflow::Wrap => self.wrapping_sub(rhs),
                    Overflow::Saturate => self.saturating_sub(rhs),
                }
            }

            #[inline]
            fn neg_with(self, overflow: Overflow) -> Self {
                match overflow {
                    Overflow::Wrap => self.wrapping_neg(),
                    Overflow::Saturate => self.saturating_neg(),
                }
            }

            #[inline]
            fn checked_add(self, rhs: Self) -> Option<Self> {
                <$t>::checked_add(self, rhs)
            }

            #[inline]
            fn checked_sub(self, rhs: Self) -> Option<Self> {
                <$t>::checked_sub(self, rhs)
            }

            #[inline]
            fn abs_branchless(self) -> Self {
                let mask = self >> (<$t>::BITS - 1);
                (self ^ mask).wrapping_sub(mask)
            }

            #[inline]
            fn rem_trunc(self, rhs: Self) -> Self {
                self.wrapping_rem(rhs)
            }

            #[inline]
            fn mid_floor(self, rhs: Self) -> Self {
                (((self as $wide) + (rhs as $wide)) >> 1) as $t
            }

            #[inline]
            fn from_f64_scaled(x: f64, frac: u32) -> Self {
                // `as` saturates on out-of-range floats and maps NaN to 0.
                (x * (frac as f64).exp2()).round() as $t
            }

            #[inline]
            fn to_f64_scaled(self, frac: u32) -> f64 {
                self as f64 / (frac as f64).exp2()
            }

            #[inline]
            fn from_int_shl(i: i64, frac: u32) -> Self {
                (i as $t).wrapping_shl(frac)
            }

            #[inline]
            fn to_int_shr(self, frac: u32) -> i64 {
                (self >> frac) as i64
            }

            #[inline]
            fn as_i64(self) -> i64 {
                self as i64
            }
        }
    )*};
}

impl_storage! {
    i8 => i16,
    i16 => i32,
    i32 => i64,
    i64 => i128,
}
