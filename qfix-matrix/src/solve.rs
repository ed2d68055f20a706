use log::{debug, trace};
use qfix_math::{Fixed, QFormat};

use crate::decompose::{Lu, Plu};
use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

impl<Q: QFormat> Matrix<Q> {
    fn check_triangular_system(&self, b: &Self, dst: &Self, op: &'static str) -> Result<usize> {
        let n = self.ensure_square(op)?;
        b.ensure_column_vector(op)?;
        b.ensure_shape(op, n, 1)?;
        dst.ensure_shape(op, n, 1)?;
        Ok(n)
    }

    /// Solve `self · y = b` top-down for lower-triangular `self`.
    ///
    /// Entries above the diagonal are ignored. A zero diagonal entry is
    /// reported as `Singular`.
    pub fn forward_substitution_into(&self, b: &Self, dst: &mut Self) -> Result<()> {
        let n = self.check_triangular_system(b, dst, "forward substitution")?;
        for i in 0..n {
            let mut acc = b[(i, 0)];
            for j in 0..i {
                acc -= self[(i, j)] * dst[(j, 0)];
            }
            dst[(i, 0)] = self.divide_by_diagonal(acc, i)?;
        }
        Ok(())
    }

    pub fn forward_substitution(&self, b: &Self) -> Result<Self> {
        let mut dst = Self::zeroed(b.rows(), 1);
        self.forward_substitution_into(b, &mut dst)?;
        Ok(dst)
    }

    /// Solve `self · x = y` bottom-up for upper-triangular `self`.
    pub fn back_substitution_into(&self, y: &Self, dst: &mut Self) -> Result<()> {
        let n = self.check_triangular_system(y, dst, "back substitution")?;
        for i in (0..n).rev() {
            let mut acc = y[(i, 0)];
            for j in i + 1..n {
                acc -= self[(i, j)] * dst[(j, 0)];
            }
            dst[(i, 0)] = self.divide_by_diagonal(acc, i)?;
        }
        Ok(())
    }

    pub fn back_substitution(&self, y: &Self) -> Result<Self> {
        let mut dst = Self::zeroed(y.rows(), 1);
        self.back_substitution_into(y, &mut dst)?;
        Ok(dst)
    }

    fn divide_by_diagonal(&self, value: Fixed<Q>, i: usize) -> Result<Fixed<Q>> {
        let d = self[(i, i)];
        if d.is_zero() {
            return Err(MatrixError::Singular { pivot: i });
        }
        Ok(value.divide(d)?)
    }

    /// `A · x = b` given `A = l · u`.
    pub fn lu_solve_into(l: &Self, u: &Self, b: &Self, dst: &mut Self) -> Result<()> {
        let y = l.forward_substitution(b)?;
        u.back_substitution_into(&y, dst)
    }

    pub fn lu_solve(l: &Self, u: &Self, b: &Self) -> Result<Self> {
        let mut dst = Self::zeroed(b.rows(), 1);
        Self::lu_solve_into(l, u, b, &mut dst)?;
        Ok(dst)
    }

    /// `A · x = b` given `p · A = l · u`: solves `l · u · x = p · b`.
    pub fn lup_solve_into(p: &Self, l: &Self, u: &Self, b: &Self, dst: &mut Self) -> Result<()> {
        b.ensure_column_vector("LUP solve")?;
        let z = p.dot(b)?;
        Self::lu_solve_into(l, u, &z, dst)
    }

    pub fn lup_solve(p: &Self, l: &Self, u: &Self, b: &Self) -> Result<Self> {
        let mut dst = Self::zeroed(b.rows(), 1);
        Self::lup_solve_into(p, l, u, b, &mut dst)?;
        Ok(dst)
    }

    /// Solve `self · x = b` through a fresh PLU decomposition.
    pub fn solve(&self, b: &Self) -> Result<Self> {
        self.plu()?.solve(b)
    }

    /// Inverse into an `n x n` destination, one LUP solve per identity
    /// column.
    pub fn inverse_into(&self, dst: &mut Self) -> Result<()> {
        let n = self.ensure_square("inverse")?;
        dst.ensure_shape("inverse", n, n)?;
        let plu = self.plu()?;

        let mut e = Self::zeroed(n, 1);
        let mut x = Self::zeroed(n, 1);
        for i in 0..n {
            e.fill_zeros();
            e[(i, 0)] = Fixed::one();
            plu.solve_into(&e, &mut x)?;
            for r in 0..n {
                dst[(r, i)] = x[(r, 0)];
            }
            trace!("inverse: solved column {} of {}", i, n);
        }
        debug!("inverse: inverted {}x{} matrix ({} row swaps)", n, n, plu.swaps);
        Ok(())
    }

    pub fn inverse(&self) -> Result<Self> {
        let n = self.ensure_square("inverse")?;
        let mut dst = Self::zeroed(n, n);
        self.inverse_into(&mut dst)?;
        Ok(dst)
    }
}

impl<Q: QFormat> Lu<Q> {
    pub fn solve(&self, b: &Matrix<Q>) -> Result<Matrix<Q>> {
        Matrix::lu_solve(&self.l, &self.u, b)
    }
}

impl<Q: QFormat> Plu<Q> {
    pub fn solve_into(&self, b: &Matrix<Q>, dst: &mut Matrix<Q>) -> Result<()> {
        Matrix::lup_solve_into(&self.p, &self.l, &self.u, b, dst)
    }

    pub fn solve(&self, b: &Matrix<Q>) -> Result<Matrix<Q>> {
        Matrix::lup_solve(&self.p, &self.l, &self.u, b)
    }
}
