//! # qfix
//!
//! Deterministic fixed-point arithmetic and dense linear algebra without a
//! hardware FPU.
//!
//! - [`math`]: the Q-format scalar kernel ([`Fixed`], [`QFormat`], formats)
//! - [`matrix`]: the dense matrix engine ([`Matrix`], LU/PLU, solvers, norms)
//!
//! ```
//! use qfix::{Matrix, Q15_16};
//!
//! let a = Matrix::<Q15_16>::from_rows(&[&[2.0, 3.0, 1.0], &[4.0, 4.0, 2.0], &[1.0, 1.0, 1.0]]).unwrap();
//! let det = a.determinant().unwrap();
//! assert!((det.to_float() + 2.0).abs() < 1e-3);
//! ```

pub use qfix_math as math;
pub use qfix_matrix as matrix;

pub use qfix_math::{
    Complex, DefaultFormat, Fixed, FixedPointError, FormatInfo, Overflow, QFormat, Scalar, Q15_16,
    Q21_10, Q31_32, Q3_4, Q7_8,
};
pub use qfix_matrix::{DeterminantMethod, Lu, Matrix, MatrixError, Plu, Status};
