use qfix_math::{Fixed, QFormat};

use crate::error::Result;
use crate::matrix::Matrix;

impl<Q: QFormat> Matrix<Q> {
    /// Maximum absolute column sum.
    pub fn norm_one(&self) -> Fixed<Q> {
        (0..self.cols())
            .map(|j| (0..self.rows()).map(|i| self[(i, j)].absolute()).sum::<Fixed<Q>>())
            .max()
            .unwrap_or_else(Fixed::zero)
    }

    /// Maximum absolute row sum.
    pub fn norm_inf(&self) -> Fixed<Q> {
        (0..self.rows())
            .map(|i| self.row_slice(i).iter().map(|x| x.absolute()).sum::<Fixed<Q>>())
            .max()
            .unwrap_or_else(Fixed::zero)
    }

    /// Frobenius norm, `sqrt(Σ a_ij²)`.
    ///
    /// The sum of squares is accumulated in the matrix format. If it leaves
    /// the range under a wrapping format the sum can turn negative, which is
    /// reported as a `NegativeSqrt` math error.
    pub fn norm_euclidean(&self) -> Result<Fixed<Q>> {
        let sum_sq: Fixed<Q> = self.iter().map(|&x| x * x).sum();
        Ok(sum_sq.sqrt()?)
    }
}
