use core::fmt;

use qfix_math::{Fixed, QFormat};
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;

/// Outcome of a matrix comparison. Not an error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    #[inline]
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl From<bool> for Status {
    fn from(ok: bool) -> Self {
        if ok {
            Status::Ok
        } else {
            Status::Error
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Error => write!(f, "ERROR"),
        }
    }
}

impl<Q: QFormat> Matrix<Q> {
    /// `Ok` when the shapes and every element match exactly.
    pub fn is_equal(&self, other: &Self) -> Status {
        Status::from(self.shape() == other.shape() && self.iter().eq(other.iter()))
    }

    /// `Ok` when the shapes match and no elementwise `|a - b|` exceeds
    /// `tolerance`. A difference outside the format's range always exceeds.
    pub fn is_approx(&self, other: &Self, tolerance: Fixed<Q>) -> Status {
        if self.shape() != other.shape() || tolerance.is_negative() {
            return Status::Error;
        }
        let limit = tolerance.magnitude();
        Status::from(
            self.iter()
                .zip(other.iter())
                .all(|(&a, &b)| a.checked_sub(b).map_or(false, |d| d.magnitude() <= limit)),
        )
    }
}
