//! Trigonometric approximations.
//!
//! Cosine uses the rational form `(pi^2 - 4x^2) / (pi^2 + x^2)` on the angle
//! folded into `[-pi/2, pi/2]`; sine is recovered from the Pythagorean
//! identity with the sign of the reduced angle. Absolute error stays below
//! about `2e-3` for formats with at least 16 fractional bits.
//!
//! The formats need four integer bits or more: `pi^2 + x^2` reaches ~12.3.

use crate::fixed_point::Fixed;
use crate::format::QFormat;
use crate::storage::Storage;

/// `tan` returns `max_value()` when `|cos(a)|` is within this many raw
/// units of zero.
pub const TAN_SINGULARITY_UNITS: i64 = 2;

impl<Q: QFormat> Fixed<Q> {
    /// Angle reduced into `[-pi, pi]`.
    fn reduce_angle(self) -> Self {
        let pi = Self::pi();
        let two_pi = Self::two_pi();

        let mut x = Self::from_raw(self.raw().rem_trunc(two_pi.raw()));
        if x > pi {
            x = x - two_pi;
        }
        if x < -pi {
            x = x + two_pi;
        }
        x
    }

    pub fn cos(self) -> Self {
        let pi = Self::pi();
        let half_pi = Self::half_pi();

        let mut x = self.reduce_angle();
        let mut flip = false;
        if x > half_pi {
            x = pi - x;
            flip = true;
        } else if x < -half_pi {
            x = -pi - x;
            flip = true;
        }

        let pi2 = pi * pi;
        let x2 = x * x;
        let x2_4 = x2 + x2 + x2 + x2;
        // The denominator is at least pi^2.
        let ret = (pi2 - x2_4).quotient(pi2 + x2);

        if flip {
            -ret
        } else {
            ret
        }
    }

    pub fn sin(self) -> Self {
        let negative = self.reduce_angle().is_negative();

        let c = self.cos();
        let s2 = (Self::one() - c * c).max(Self::zero());
        let ret = s2.newton_sqrt();

        if negative {
            -ret
        } else {
            ret
        }
    }

    /// `sin / cos`, or `max_value()` as a stand-in for infinity near the poles.
    pub fn tan(self) -> Self {
        let c = self.cos();
        if c.absolute().raw().as_i64() <= TAN_SINGULARITY_UNITS {
            return Self::max_value();
        }
        self.sin().quotient(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Q15_16, Q31_32};
    use std::f64::consts::PI;

    type F = Fixed<Q15_16>;

    fn sweep() -> impl Iterator<Item = f64> {
        let n = 1 << 12;
        let start = -3.0 * PI;
        let step = 6.0 * PI / (n - 1) as f64;
        (0..n).map(move |i| start + i as f64 * step)
    }

    #[test]
    fn test_cos_sweep() {
        for angle in sweep() {
            let c = F::from_float(angle).cos().to_float();
            assert!((c - angle.cos()).abs() < 0.005, "cos({}) = {}", angle, c);
        }
    }

    #[test]
    fn test_sin_sweep() {
        for angle in sweep() {
            let s = F::from_float(angle).sin().to_float();
            assert!((s - angle.sin()).abs() < 0.005, "sin({}) = {}", angle, s);
        }
    }

    #[test]
    fn test_tan_sweep() {
        for angle in sweep() {
            let t = F::from_float(angle).tan().to_float();
            let expected = angle.tan();
            if expected.abs() > 0.1 && expected.abs() < 20.0 {
                let err = ((expected - t) / expected).abs();
                assert!(err < 0.05, "tan({}) = {} (expected {})", angle, t, expected);
            }
        }
    }

    #[test]
    fn test_tan_singularity() {
        assert_eq!(F::half_pi().tan(), F::max_value());
    }

    #[test]
    fn test_known_values() {
        assert_eq!(F::zero().cos(), F::one());
        assert_eq!(F::zero().sin(), F::zero());
        assert!((F::pi().cos().to_float() + 1.0).abs() < 1e-3);
        assert!(F::pi().sin().to_float().abs() < 0.01);
        assert!((F::from_float(PI / 4.0).tan().to_float() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_wide_format() {
        type W = Fixed<Q31_32>;
        let s = W::from_float(1.0).sin().to_float();
        let c = W::from_float(1.0).cos().to_float();
        assert!((s - 1f64.sin()).abs() < 0.005);
        assert!((c - 1f64.cos()).abs() < 0.005);
    }
}
