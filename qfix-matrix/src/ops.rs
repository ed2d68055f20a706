use qfix_math::{Fixed, QFormat};

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

impl<Q: QFormat> Matrix<Q> {
    fn zip_into(
        &self,
        other: &Self,
        dst: &mut Self,
        op: &'static str,
        f: impl Fn(Fixed<Q>, Fixed<Q>) -> Fixed<Q>,
    ) -> Result<()> {
        other.ensure_shape(op, self.rows(), self.cols())?;
        dst.ensure_shape(op, self.rows(), self.cols())?;
        for i in 0..self.rows() {
            let (a, b) = (self.row_slice(i), other.row_slice(i));
            for ((d, &x), &y) in dst.row_slice_mut(i).iter_mut().zip(a).zip(b) {
                *d = f(x, y);
            }
        }
        Ok(())
    }

    /// Elementwise `self + other`.
    pub fn sum_into(&self, other: &Self, dst: &mut Self) -> Result<()> {
        self.zip_into(other, dst, "sum", |a, b| a + b)
    }

    pub fn sum(&self, other: &Self) -> Result<Self> {
        let mut dst = Self::zeroed(self.rows(), self.cols());
        self.sum_into(other, &mut dst)?;
        Ok(dst)
    }

    /// Elementwise `self - other`.
    pub fn sub_into(&self, other: &Self, dst: &mut Self) -> Result<()> {
        self.zip_into(other, dst, "difference", |a, b| a - b)
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        let mut dst = Self::zeroed(self.rows(), self.cols());
        self.sub_into(other, &mut dst)?;
        Ok(dst)
    }

    /// Hadamard product.
    pub fn elementwise_mul_into(&self, other: &Self, dst: &mut Self) -> Result<()> {
        self.zip_into(other, dst, "elementwise product", |a, b| a * b)
    }

    pub fn elementwise_mul(&self, other: &Self) -> Result<Self> {
        let mut dst = Self::zeroed(self.rows(), self.cols());
        self.elementwise_mul_into(other, &mut dst)?;
        Ok(dst)
    }

    pub fn scalar_mul_into(&self, k: Fixed<Q>, dst: &mut Self) -> Result<()> {
        self.copy_into(dst)?;
        dst.scale(k);
        Ok(())
    }

    /// Multiply every element by `k` in place.
    pub fn scale(&mut self, k: Fixed<Q>) {
        self.iter_mut().for_each(|x| *x = *x * k);
    }

    pub fn scalar_mul(&self, k: Fixed<Q>) -> Self {
        let mut dst = self.clone();
        dst.scale(k);
        dst
    }

    /// Matrix product `self (r x n) * other (n x c)` into an `r x c`
    /// destination.
    ///
    /// `dst` is zeroed and then accumulated into; the borrow rules keep it
    /// distinct from both operands.
    pub fn dot_into(&self, other: &Self, dst: &mut Self) -> Result<()> {
        if other.rows() != self.cols() {
            return Err(MatrixError::DimensionMismatch {
                op: "dot product",
                expected: (self.cols(), other.cols()),
                found: other.shape(),
            });
        }
        dst.ensure_shape("dot product", self.rows(), other.cols())?;
        dst.fill_zeros();
        for i in 0..self.rows() {
            for (k, &a) in self.row_slice(i).iter().enumerate() {
                if a.is_zero() {
                    continue;
                }
                for (d, &b) in dst.row_slice_mut(i).iter_mut().zip(other.row_slice(k)) {
                    *d += a * b;
                }
            }
        }
        Ok(())
    }

    pub fn dot(&self, other: &Self) -> Result<Self> {
        let mut dst = Self::zeroed(self.rows(), other.cols());
        self.dot_into(other, &mut dst)?;
        Ok(dst)
    }

    /// Cross product of two 3-element vectors (row or column). `dst` takes
    /// the shape of `self`.
    pub fn cross_product_into(&self, other: &Self, dst: &mut Self) -> Result<()> {
        let a = self.three_vector()?;
        let b = other.three_vector()?;
        dst.ensure_shape("cross product", self.rows(), self.cols())?;
        let c = [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ];
        for (d, v) in dst.iter_mut().zip(c) {
            *d = v;
        }
        Ok(())
    }

    pub fn cross_product(&self, other: &Self) -> Result<Self> {
        let mut dst = Self::zeroed(self.rows(), self.cols());
        self.cross_product_into(other, &mut dst)?;
        Ok(dst)
    }

    fn three_vector(&self) -> Result<[Fixed<Q>; 3]> {
        match self.shape() {
            (3, 1) | (1, 3) => {
                let mut v = [Fixed::zero(); 3];
                for (d, &x) in v.iter_mut().zip(self.iter()) {
                    *d = x;
                }
                Ok(v)
            }
            (rows, cols) => Err(MatrixError::NotThreeVector { rows, cols }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfix_math::Q15_16;

    type M = Matrix<Q15_16>;

    #[test]
    fn test_sum_and_sub() {
        let a = M::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
        let b = M::from_rows(&[&[0.5, -2.0], &[1.0, 1.0]]).unwrap();
        assert_eq!(a.sum(&b).unwrap().to_f64_vec(), vec![1.5, 0.0, 4.0, 5.0]);
        assert_eq!(a.sub(&b).unwrap().to_f64_vec(), vec![0.5, 4.0, 2.0, 3.0]);

        let c = M::new(2, 3).unwrap();
        assert!(matches!(a.sum(&c), Err(MatrixError::DimensionMismatch { .. })));
        let mut wrong = M::new(1, 1).unwrap();
        assert!(a.sum_into(&b, &mut wrong).is_err());
    }

    #[test]
    fn test_scalar_and_elementwise() {
        let a = M::from_rows(&[&[1.0, -2.0], &[0.5, 4.0]]).unwrap();
        let k = Fixed::from_float(1.5);
        assert_eq!(a.scalar_mul(k).to_f64_vec(), vec![1.5, -3.0, 0.75, 6.0]);

        let mut dst = M::new(2, 2).unwrap();
        a.scalar_mul_into(k, &mut dst).unwrap();
        assert_eq!(dst, a.scalar_mul(k));

        assert_eq!(a.elementwise_mul(&a).unwrap().to_f64_vec(), vec![1.0, 4.0, 0.25, 16.0]);
    }

    #[test]
    fn test_dot() {
        let a = M::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        let b = M::from_rows(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]).unwrap();
        let c = a.dot(&b).unwrap();
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c.to_f64_vec(), vec![58.0, 64.0, 139.0, 154.0]);

        assert!(matches!(a.dot(&a), Err(MatrixError::DimensionMismatch { .. })));

        let mut dst = M::new(2, 2).unwrap();
        dst.fill_ones();
        a.dot_into(&b, &mut dst).unwrap();
        assert_eq!(dst, c);
    }

    #[test]
    fn test_dot_identity() {
        let a = M::from_rows(&[&[1.5, -2.0], &[3.25, 4.0]]).unwrap();
        let i = M::identity(2).unwrap();
        assert_eq!(a.dot(&i).unwrap(), a);
        assert_eq!(i.dot(&a).unwrap(), a);
    }

    #[test]
    fn test_cross_product() {
        let x = M::from_f64(3, 1, &[1.0, 0.0, 0.0]).unwrap();
        let y = M::from_f64(1, 3, &[0.0, 1.0, 0.0]).unwrap();
        let z = x.cross_product(&y).unwrap();
        assert_eq!(z.shape(), (3, 1));
        assert_eq!(z.to_f64_vec(), vec![0.0, 0.0, 1.0]);

        let a = M::from_f64(1, 3, &[2.0, 3.0, 4.0]).unwrap();
        let b = M::from_f64(1, 3, &[5.0, 6.0, 7.0]).unwrap();
        assert_eq!(a.cross_product(&b).unwrap().to_f64_vec(), vec![-3.0, 6.0, -3.0]);

        let bad = M::new(2, 2).unwrap();
        assert_eq!(
            a.cross_product(&bad),
            Err(MatrixError::NotThreeVector { rows: 2, cols: 2 })
        );
    }
}
