//! Copies, transposes, swaps and slices.
//!
//! The `*_into` forms write into a caller-owned destination whose shape must
//! already match; nothing is resized. The owned forms allocate the result.

use qfix_math::QFormat;

use crate::error::Result;
use crate::matrix::Matrix;

impl<Q: QFormat> Matrix<Q> {
    pub fn copy_into(&self, dst: &mut Self) -> Result<()> {
        dst.ensure_shape("copy", self.rows(), self.cols())?;
        for i in 0..self.rows() {
            dst.row_slice_mut(i).copy_from_slice(self.row_slice(i));
        }
        Ok(())
    }

    /// `dst` must be `cols x rows`.
    pub fn transpose_into(&self, dst: &mut Self) -> Result<()> {
        dst.ensure_shape("transpose", self.cols(), self.rows())?;
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                dst[(j, i)] = self[(i, j)];
            }
        }
        Ok(())
    }

    pub fn transpose(&self) -> Self {
        let mut dst = Self::zeroed(self.cols(), self.rows());
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                dst[(j, i)] = self[(i, j)];
            }
        }
        dst
    }

    /// Swap rows `a` and `b` in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a, 0)?;
        self.check_index(b, 0)?;
        if a != b {
            for j in 0..self.cols() {
                let tmp = self[(a, j)];
                self[(a, j)] = self[(b, j)];
                self[(b, j)] = tmp;
            }
        }
        Ok(())
    }

    /// Swap columns `a` and `b` in place.
    pub fn swap_cols(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(0, a)?;
        self.check_index(0, b)?;
        if a != b {
            for i in 0..self.rows() {
                let tmp = self[(i, a)];
                self[(i, a)] = self[(i, b)];
                self[(i, b)] = tmp;
            }
        }
        Ok(())
    }

    /// Copy of `self` with rows `a` and `b` exchanged, written to `dst`.
    pub fn swap_rows_into(&self, a: usize, b: usize, dst: &mut Self) -> Result<()> {
        self.check_index(a, 0)?;
        self.check_index(b, 0)?;
        self.copy_into(dst)?;
        dst.swap_rows(a, b)
    }

    pub fn swap_cols_into(&self, a: usize, b: usize, dst: &mut Self) -> Result<()> {
        self.check_index(0, a)?;
        self.check_index(0, b)?;
        self.copy_into(dst)?;
        dst.swap_cols(a, b)
    }

    /// Row `i` into a `1 x cols` destination.
    pub fn row_into(&self, i: usize, dst: &mut Self) -> Result<()> {
        self.check_index(i, 0)?;
        dst.ensure_shape("row slice", 1, self.cols())?;
        dst.row_slice_mut(0).copy_from_slice(self.row_slice(i));
        Ok(())
    }

    pub fn row(&self, i: usize) -> Result<Self> {
        let mut dst = Self::new(1, self.cols())?;
        self.row_into(i, &mut dst)?;
        Ok(dst)
    }

    /// Column `j` into a `rows x 1` destination.
    pub fn col_into(&self, j: usize, dst: &mut Self) -> Result<()> {
        self.check_index(0, j)?;
        dst.ensure_shape("column slice", self.rows(), 1)?;
        for i in 0..self.rows() {
            dst[(i, 0)] = self[(i, j)];
        }
        Ok(())
    }

    pub fn col(&self, j: usize) -> Result<Self> {
        let mut dst = Self::new(self.rows(), 1)?;
        self.col_into(j, &mut dst)?;
        Ok(dst)
    }

    /// `self` without `row` and `col`, into a `(rows-1) x (cols-1)`
    /// destination.
    pub fn submatrix_into(&self, row: usize, col: usize, dst: &mut Self) -> Result<()> {
        self.check_index(row, col)?;
        dst.ensure_shape("submatrix", self.rows() - 1, self.cols() - 1)?;
        let rows = (0..self.rows()).filter(|&i| i != row);
        for (di, i) in rows.enumerate() {
            let cols = (0..self.cols()).filter(|&j| j != col);
            for (dj, j) in cols.enumerate() {
                dst[(di, dj)] = self[(i, j)];
            }
        }
        Ok(())
    }

    /// Fails with `ZeroDimension` when `self` has a single row or column.
    pub fn submatrix(&self, row: usize, col: usize) -> Result<Self> {
        self.check_index(row, col)?;
        let mut dst = Self::new(self.rows() - 1, self.cols() - 1)?;
        self.submatrix_into(row, col, &mut dst)?;
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;
    use qfix_math::Q15_16;

    type M = Matrix<Q15_16>;

    fn sample() -> M {
        M::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_copy_into() {
        let a = sample();
        let mut b = M::new(2, 3).unwrap();
        a.copy_into(&mut b).unwrap();
        assert_eq!(a, b);

        let mut wrong = M::new(3, 2).unwrap();
        assert!(matches!(a.copy_into(&mut wrong), Err(MatrixError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_transpose() {
        let a = sample();
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.to_f64_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(t.transpose(), a);

        let mut dst = M::new(3, 2).unwrap();
        a.transpose_into(&mut dst).unwrap();
        assert_eq!(dst, t);
        assert!(a.transpose_into(&mut M::new(2, 3).unwrap()).is_err());
    }

    #[test]
    fn test_swaps() {
        let mut a = sample();
        a.swap_rows(0, 1).unwrap();
        assert_eq!(a.to_f64_vec(), vec![4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
        a.swap_cols(0, 2).unwrap();
        assert_eq!(a.to_f64_vec(), vec![6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        assert!(a.swap_rows(0, 2).is_err());
        assert!(a.swap_cols(3, 0).is_err());
    }

    #[test]
    fn test_swap_into_leaves_source() {
        let a = sample();
        let mut dst = M::new(2, 3).unwrap();
        a.swap_rows_into(0, 1, &mut dst).unwrap();
        assert_eq!(dst.to_f64_vec(), vec![4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
        a.swap_cols_into(1, 2, &mut dst).unwrap();
        assert_eq!(dst.to_f64_vec(), vec![1.0, 3.0, 2.0, 4.0, 6.0, 5.0]);
        assert_eq!(a, sample());
    }

    #[test]
    fn test_row_and_col_slices() {
        let a = sample();
        assert_eq!(a.row(1).unwrap().to_f64_vec(), vec![4.0, 5.0, 6.0]);
        assert_eq!(a.col(2).unwrap().shape(), (2, 1));
        assert_eq!(a.col(2).unwrap().to_f64_vec(), vec![3.0, 6.0]);
        assert!(a.row(2).is_err());

        let mut wrong = M::new(1, 2).unwrap();
        assert!(a.row_into(0, &mut wrong).is_err());
    }

    #[test]
    fn test_submatrix() {
        let a = M::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]).unwrap();
        assert_eq!(a.submatrix(0, 0).unwrap().to_f64_vec(), vec![5.0, 6.0, 8.0, 9.0]);
        assert_eq!(a.submatrix(1, 2).unwrap().to_f64_vec(), vec![1.0, 2.0, 7.0, 8.0]);
        assert!(matches!(
            M::new(1, 3).unwrap().submatrix(0, 0),
            Err(MatrixError::ZeroDimension { .. })
        ));
    }
}
