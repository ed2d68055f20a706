//! # qfix-matrix
//!
//! Dense row-major matrices over [`qfix_math::Fixed`] scalars.
//!
//! Key types:
//! - [`Matrix`]: owned `rows x cols` buffer, generic over the Q format
//! - [`Lu`] / [`Plu`]: Doolittle and partial-pivoting factorizations
//! - [`DeterminantMethod`]: explicit choice between pivoted LU and Laplace
//! - [`Status`]: result of the exact and approximate equality checks
//!
//! Operations that write into a destination come in `*_into` form and check
//! the destination's shape first. Owned variants allocate the result.
//! Contract violations return [`MatrixError`]; fixed-point range overflow
//! follows the format's policy and is not reported.

pub mod compare;
pub mod decompose;
pub mod determinant;
pub mod error;
pub mod matrix;
pub mod norms;
pub mod ops;
pub mod solve;
pub mod structural;

pub use compare::Status;
pub use decompose::{Lu, Plu};
pub use determinant::DeterminantMethod;
pub use error::{MatrixError, Result};
pub use matrix::Matrix;
