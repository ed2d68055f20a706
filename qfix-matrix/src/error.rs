use qfix_math::FixedPointError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Matrix dimensions must be non-zero (got {rows}x{cols})")]
    ZeroDimension { rows: usize, cols: usize },

    #[error("Dimension mismatch in {op}: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        op: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("{op} requires a square matrix (got {rows}x{cols})")]
    NotSquare { op: &'static str, rows: usize, cols: usize },

    #[error("{op} requires a column vector (got {rows}x{cols})")]
    NotColumnVector { op: &'static str, rows: usize, cols: usize },

    #[error("Index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Matrix is singular (zero pivot in column {pivot})")]
    Singular { pivot: usize },

    #[error("Expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Cross product requires 3-element vectors (got {rows}x{cols})")]
    NotThreeVector { rows: usize, cols: usize },

    #[error("Math error: {0}")]
    Math(#[from] FixedPointError),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
