use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use log::trace;

use crate::fixed_point::{Fixed, FixedPointError, Result};
use crate::format::QFormat;
use crate::storage::{Overflow, Storage};

/// Newton iterations allowed in [`Fixed::sqrt`]. Very large or very small
/// inputs may stop at the cap before reaching [`SQRT_EPSILON`].
pub const SQRT_MAX_ITERATIONS: u32 = 10;

/// Convergence threshold of [`Fixed::sqrt`] on `|a/y - y|`.
pub const SQRT_EPSILON: f64 = 0.001;

impl<Q: QFormat> Fixed<Q> {
    /// `(a * b) >> F` with a wide intermediate. The narrowing back to the
    /// storage type follows `Q::OVERFLOW`, so with the default `Wrap` policy
    /// products outside the range silently wrap.
    #[inline]
    pub fn multiply(self, rhs: Self) -> Self {
        let wide = self.raw().mul_shr(rhs.raw(), Q::FRAC_BITS);
        Self::from_raw(<Q::Storage as Storage>::narrow(wide, Q::OVERFLOW))
    }

    /// Product, or `None` if it does not fit the format.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let wide = self.raw().mul_shr(rhs.raw(), Q::FRAC_BITS);
        <Q::Storage as Storage>::narrow_checked(wide).map(Self::from_raw)
    }

    /// Product clamped to `[min_value, max_value]` regardless of `Q::OVERFLOW`.
    #[inline]
    pub fn saturating_mul(self, rhs: Self) -> Self {
        let wide = self.raw().mul_shr(rhs.raw(), Q::FRAC_BITS);
        Self::from_raw(<Q::Storage as Storage>::narrow(wide, Overflow::Saturate))
    }

    /// `(a << F) / b` with a wide intermediate.
    pub fn divide(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(FixedPointError::DivisionByZero);
        }
        Ok(self.quotient(rhs))
    }

    /// Division by a divisor already known to be non-zero.
    #[inline]
    pub(crate) fn quotient(self, rhs: Self) -> Self {
        let wide = self.raw().shl_div(rhs.raw(), Q::FRAC_BITS);
        Self::from_raw(<Q::Storage as Storage>::narrow(wide, Q::OVERFLOW))
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.raw().checked_add(rhs.raw()).map(Self::from_raw)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.raw().checked_sub(rhs.raw()).map(Self::from_raw)
    }

    /// Branchless absolute value. `absolute(min_value())` is `min_value()`.
    #[inline]
    pub fn absolute(self) -> Self {
        Self::from_raw(self.raw().abs_branchless())
    }

    /// Raw magnitude `|raw|` as an unsigned integer. Unlike [`absolute`],
    /// `min_value()` ranks above every other value.
    ///
    /// [`absolute`]: Fixed::absolute
    #[inline]
    pub fn magnitude(self) -> u64 {
        self.raw().as_i64().unsigned_abs()
    }

    /// `a^n` by repeated multiplication.
    ///
    /// `n == 0` gives one for every `a`, zero included. Negative `n` inverts
    /// `a` first, so `0^n` with `n < 0` is a division by zero.
    pub fn int_power(self, n: i32) -> Result<Self> {
        if n == 0 {
            return Ok(Self::one());
        }
        let base = if n < 0 { Self::one().divide(self)? } else { self };
        if base.is_zero() {
            return Ok(Self::zero());
        }

        let mut acc = Self::one();
        for _ in 0..n.unsigned_abs() {
            acc = base.multiply(acc);
            if acc.is_zero() {
                break;
            }
        }
        Ok(acc)
    }

    /// Newton-Raphson square root starting from `y = 1`.
    ///
    /// Stops once `|a/y - y| <= SQRT_EPSILON` or after
    /// [`SQRT_MAX_ITERATIONS`] updates.
    pub fn sqrt(self) -> Result<Self> {
        if self.is_negative() {
            return Err(FixedPointError::NegativeSqrt(self.raw().as_i64()));
        }
        Ok(self.newton_sqrt())
    }

    /// Square root of a value already known to be non-negative.
    pub(crate) fn newton_sqrt(self) -> Self {
        if self.is_zero() {
            return self;
        }
        let epsilon = Self::from_float(SQRT_EPSILON);

        let mut y = Self::one();
        for _ in 0..SQRT_MAX_ITERATIONS {
            let q = self.quotient(y);
            if (q - y).absolute() <= epsilon {
                return y;
            }
            y = Self::from_raw(q.raw().mid_floor(y.raw()));
            // Underflow for inputs below the format's resolution.
            if y.is_zero() {
                return y;
            }
        }
        trace!("sqrt({}) stopped at the iteration cap with {}", self, y);
        y
    }
}

impl<Q: QFormat> Add for Fixed<Q> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw().add_with(rhs.raw(), Q::OVERFLOW))
    }
}

impl<Q: QFormat> Sub for Fixed<Q> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw().sub_with(rhs.raw(), Q::OVERFLOW))
    }
}

impl<Q: QFormat> Neg for Fixed<Q> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_raw(self.raw().neg_with(Q::OVERFLOW))
    }
}

impl<Q: QFormat> Mul for Fixed<Q> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl<Q: QFormat> AddAssign for Fixed<Q> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<Q: QFormat> SubAssign for Fixed<Q> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<Q: QFormat> MulAssign for Fixed<Q> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(rhs);
    }
}

impl<Q: QFormat> Sum for Fixed<Q> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a, Q: QFormat> Sum<&'a Fixed<Q>> for Fixed<Q> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, &x| acc + x)
    }
}
