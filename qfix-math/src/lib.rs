//! # qfix-math
//!
//! Deterministic fixed-point ("Q format") scalar arithmetic for targets where
//! floating point is unavailable, slow or non-reproducible.
//!
//! A [`Fixed<Q>`] wraps a signed integer and reads as `raw / 2^F`. The format
//! `Q` is a marker type implementing [`QFormat`]; it is the one place where
//! the storage width, the fractional bit count `F` and the [`Overflow`]
//! policy are chosen. [`Q15_16`] (32-bit storage, 16 fractional bits) is the
//! default.
//!
//! Kernels: conversions, wide-intermediate multiply and divide, branchless
//! absolute value, integer power, Newton square root, and rational
//! sine/cosine/tangent approximations. Fallible operations return
//! [`FixedPointError`]; range overflow is not an error and follows the
//! format's policy (wrapping by default).

pub mod complex;
pub mod fixed_point;
pub mod format;
pub mod ops;
pub mod random;
pub mod storage;
pub mod trig;

pub use complex::Complex;
pub use fixed_point::{Fixed, FixedPointError, Result, Scalar};
pub use format::{DefaultFormat, FormatInfo, QFormat, Q15_16, Q21_10, Q31_32, Q3_4, Q7_8};
pub use ops::{SQRT_EPSILON, SQRT_MAX_ITERATIONS};
pub use storage::{Overflow, Storage};
pub use trig::TAN_SINGULARITY_UNITS;
