use core::fmt;
use core::ops::{Index, IndexMut};

use qfix_math::{DefaultFormat, Fixed, QFormat};
use rand::Rng;
use zeroize::Zeroize;

use crate::error::{MatrixError, Result};

/// Dense row-major matrix of fixed-point values.
///
/// Element `(i, j)` lives at `data[i * stride + j]`. Dimensions are fixed at
/// construction; every constructor sets `stride == cols`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Matrix<Q: QFormat = DefaultFormat> {
    rows: usize,
    cols: usize,
    stride: usize,
    data: Vec<Fixed<Q>>,
}

impl<Q: QFormat> Matrix<Q> {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::ZeroDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            stride: cols,
            data: vec![Fixed::zero(); rows * cols],
        })
    }

    /// Zero matrix for dimensions taken from an existing matrix.
    pub(crate) fn zeroed(rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        Self {
            rows,
            cols,
            stride: cols,
            data: vec![Fixed::zero(); rows * cols],
        }
    }

    pub fn square(n: usize) -> Result<Self> {
        Self::new(n, n)
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::square(n)?;
        m.fill_identity()?;
        Ok(m)
    }

    /// Build from row-major float values.
    pub fn from_f64(rows: usize, cols: usize, values: &[f64]) -> Result<Self> {
        let data = values.iter().map(|&v| Fixed::from_float(v)).collect();
        Self::from_fixed(rows, cols, data)
    }

    /// Build from float rows. All rows must have the same length.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut m = Self::new(rows.len(), cols)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::LengthMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            for (j, &v) in row.iter().enumerate() {
                m[(i, j)] = Fixed::from_float(v);
            }
        }
        Ok(m)
    }

    /// Take ownership of a row-major buffer of `rows * cols` values.
    pub fn from_fixed(rows: usize, cols: usize, data: Vec<Fixed<Q>>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::ZeroDimension { rows, cols });
        }
        if data.len() != rows * cols {
            return Err(MatrixError::LengthMismatch {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            stride: cols,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn is_column_vector(&self) -> bool {
        self.cols == 1
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Fixed<Q>> {
        self.check_index(row, col)?;
        Ok(self[(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: Fixed<Q>) -> Result<()> {
        self.check_index(row, col)?;
        self[(row, col)] = value;
        Ok(())
    }

    /// Elements of row `i` (without stride padding).
    #[inline]
    pub(crate) fn row_slice(&self, i: usize) -> &[Fixed<Q>] {
        let start = i * self.stride;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub(crate) fn row_slice_mut(&mut self, i: usize) -> &mut [Fixed<Q>] {
        let start = i * self.stride;
        &mut self.data[start..start + self.cols]
    }

    /// All logical elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Fixed<Q>> + '_ {
        (0..self.rows).flat_map(move |i| self.row_slice(i).iter())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Fixed<Q>> + '_ {
        let cols = self.cols;
        self.data
            .chunks_mut(self.stride)
            .flat_map(move |row| row[..cols].iter_mut())
    }

    /// Row-major float copy of the contents, for display and tests.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.iter().map(|x| x.to_float()).collect()
    }

    pub fn fill(&mut self, value: Fixed<Q>) {
        self.iter_mut().for_each(|x| *x = value);
    }

    pub fn fill_f64(&mut self, value: f64) {
        self.fill(Fixed::from_float(value));
    }

    pub fn fill_zeros(&mut self) {
        self.fill(Fixed::zero());
    }

    pub fn fill_ones(&mut self) {
        self.fill(Fixed::one());
    }

    /// Ones on the diagonal, zeros elsewhere. Square matrices only.
    pub fn fill_identity(&mut self) -> Result<()> {
        let n = self.ensure_square("fill_identity")?;
        self.fill_zeros();
        for i in 0..n {
            self[(i, i)] = Fixed::one();
        }
        Ok(())
    }

    /// Independent uniform draws in `[min, max]` for every element.
    pub fn fill_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        min: Fixed<Q>,
        max: Fixed<Q>,
    ) -> Result<()> {
        for x in self.iter_mut() {
            *x = Fixed::random_in(rng, min, max)?;
        }
        Ok(())
    }

    pub fn fill_random_f64<R: Rng + ?Sized>(&mut self, rng: &mut R, min: f64, max: f64) -> Result<()> {
        self.fill_random(rng, Fixed::from_float(min), Fixed::from_float(max))
    }

    /// Overwrite every element with zero, keeping the shape.
    pub fn wipe(&mut self) {
        self.data.as_mut_slice().zeroize();
    }

    /// Wipe the buffer before releasing it.
    pub fn free_deep(mut self) {
        self.wipe();
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> Result<Fixed<Q>> {
        let n = self.ensure_square("trace")?;
        Ok((0..n).map(|i| self[(i, i)]).sum())
    }

    pub fn sum_contents(&self) -> Fixed<Q> {
        self.iter().sum()
    }

    pub(crate) fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    pub(crate) fn ensure_shape(&self, op: &'static str, rows: usize, cols: usize) -> Result<()> {
        if self.shape() != (rows, cols) {
            return Err(MatrixError::DimensionMismatch {
                op,
                expected: (rows, cols),
                found: self.shape(),
            });
        }
        Ok(())
    }

    /// Side length, or `NotSquare`.
    pub(crate) fn ensure_square(&self, op: &'static str) -> Result<usize> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                op,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.rows)
    }

    pub(crate) fn ensure_column_vector(&self, op: &'static str) -> Result<()> {
        if !self.is_column_vector() {
            return Err(MatrixError::NotColumnVector {
                op,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl<Q: QFormat> Index<(usize, usize)> for Matrix<Q> {
    type Output = Fixed<Q>;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Fixed<Q> {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.stride + col]
    }
}

impl<Q: QFormat> IndexMut<(usize, usize)> for Matrix<Q> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Fixed<Q> {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.stride + col]
    }
}

impl<Q: QFormat> fmt::Display for Matrix<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix {}x{} ({})", self.rows, self.cols, Q::NAME)?;
        for i in 0..self.rows {
            write!(f, "[")?;
            for (j, x) in self.row_slice(i).iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:>11.6}", x.to_float())?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfix_math::{Q15_16, Q7_8};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type M = Matrix<Q15_16>;

    #[test]
    fn test_new_is_zeroed() {
        let m = M::new(3, 4).unwrap();
        assert_eq!(m.shape(), (3, 4));
        assert_eq!(m.stride(), 4);
        assert!(m.iter().all(|x| x.is_zero()));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(M::new(0, 3), Err(MatrixError::ZeroDimension { rows: 0, cols: 3 }));
        assert!(matches!(M::from_rows(&[]), Err(MatrixError::ZeroDimension { .. })));
    }

    #[test]
    fn test_from_rows_and_index() {
        let m = M::from_rows(&[&[1.0, 2.0], &[3.0, 4.5]]).unwrap();
        assert_eq!(m[(1, 1)].to_float(), 4.5);
        assert_eq!(m.to_f64_vec(), vec![1.0, 2.0, 3.0, 4.5]);

        let ragged = M::from_rows(&[&[1.0, 2.0], &[3.0]]);
        assert_eq!(ragged, Err(MatrixError::LengthMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_from_f64_length_checked() {
        assert!(M::from_f64(2, 2, &[1.0, 2.0, 3.0]).is_err());
        assert!(M::from_f64(2, 2, &[1.0, 2.0, 3.0, 4.0]).is_ok());
    }

    #[test]
    fn test_get_set_bounds() {
        let mut m = M::new(2, 2).unwrap();
        m.set(0, 1, Fixed::from_int(7)).unwrap();
        assert_eq!(m.get(0, 1).unwrap(), Fixed::from_int(7));
        assert!(matches!(m.get(2, 0), Err(MatrixError::IndexOutOfBounds { .. })));
        assert!(m.set(0, 2, Fixed::one()).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_panics_out_of_bounds() {
        let m = M::new(2, 2).unwrap();
        let _ = m[(0, 2)];
    }

    #[test]
    fn test_fills() {
        let mut m = M::new(2, 3).unwrap();
        m.fill_ones();
        assert_eq!(m.sum_contents(), Fixed::from_int(6));
        m.fill_f64(-0.5);
        assert_eq!(m.sum_contents(), Fixed::from_int(-3));
        assert!(matches!(m.fill_identity(), Err(MatrixError::NotSquare { .. })));

        let i = M::identity(3).unwrap();
        assert_eq!(i.trace().unwrap(), Fixed::from_int(3));
        assert_eq!(i.sum_contents(), Fixed::from_int(3));
    }

    #[test]
    fn test_fill_random_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut m = Matrix::<Q7_8>::new(5, 5).unwrap();
        m.fill_random_f64(&mut rng, -10.0, 10.0).unwrap();
        assert!(m.to_f64_vec().iter().all(|&x| (-10.0..=10.0).contains(&x)));
        assert!(m.fill_random_f64(&mut rng, 1.0, -1.0).is_err());
    }

    #[test]
    fn test_fill_random_is_seeded() {
        let mut a = M::new(4, 4).unwrap();
        let mut b = M::new(4, 4).unwrap();
        a.fill_random_f64(&mut StdRng::seed_from_u64(3), -1.0, 1.0).unwrap();
        b.fill_random_f64(&mut StdRng::seed_from_u64(3), -1.0, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_trace_requires_square() {
        let m = M::new(2, 3).unwrap();
        assert!(m.trace().is_err());
    }

    #[test]
    fn test_display() {
        let m = M::from_rows(&[&[1.0, -2.0]]).unwrap();
        let s = m.to_string();
        assert!(s.starts_with("Matrix 1x2 (Q15_16)"));
        assert!(s.contains("1.000000"));
        assert!(s.contains("-2.000000"));
    }

    #[test]
    fn test_free_deep() {
        let mut m = M::from_rows(&[&[1.5, -2.0], &[3.25, 4.0]]).unwrap();
        m.wipe();
        assert_eq!(m.shape(), (2, 2));
        assert!(m.iter().all(|x| x.is_zero()));
        assert_eq!(m, M::new(2, 2).unwrap());

        let m = M::identity(4).unwrap();
        m.free_deep();
    }
}
