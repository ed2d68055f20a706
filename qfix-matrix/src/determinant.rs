use core::fmt;

use qfix_math::{Fixed, QFormat};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matrix::Matrix;

/// Algorithm used by [`Matrix::determinant_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeterminantMethod {
    /// `sign(P) · Π U[i][i]` from partial-pivoting elimination. O(n³).
    #[default]
    PivotedLu,
    /// Cofactor expansion along the first row. O(n!), for small matrices.
    Laplace,
}

impl fmt::Display for DeterminantMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeterminantMethod::PivotedLu => write!(f, "pivoted-lu"),
            DeterminantMethod::Laplace => write!(f, "laplace"),
        }
    }
}

impl<Q: QFormat> Matrix<Q> {
    /// Determinant via [`DeterminantMethod::PivotedLu`].
    pub fn determinant(&self) -> Result<Fixed<Q>> {
        self.determinant_with(DeterminantMethod::PivotedLu)
    }

    /// Determinant by the chosen method. A singular matrix yields zero
    /// rather than an error.
    pub fn determinant_with(&self, method: DeterminantMethod) -> Result<Fixed<Q>> {
        self.ensure_square("determinant")?;
        match method {
            DeterminantMethod::PivotedLu => self.determinant_pivoted(),
            DeterminantMethod::Laplace => self.determinant_laplace(),
        }
    }

    fn determinant_pivoted(&self) -> Result<Fixed<Q>> {
        let elim = self.pivoted_elimination()?;
        if elim.singular_at.is_some() {
            return Ok(Fixed::zero());
        }
        let plu = elim.plu;
        let n = plu.u.rows();
        Ok((0..n).fold(plu.permutation_sign(), |acc, i| acc * plu.u[(i, i)]))
    }

    fn determinant_laplace(&self) -> Result<Fixed<Q>> {
        match self.rows() {
            1 => Ok(self[(0, 0)]),
            2 => Ok(self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]),
            n => {
                let mut det = Fixed::zero();
                for j in 0..n {
                    let a = self[(0, j)];
                    if a.is_zero() {
                        continue;
                    }
                    let term = a * self.submatrix(0, j)?.determinant_laplace()?;
                    if j % 2 == 0 {
                        det += term;
                    } else {
                        det -= term;
                    }
                }
                Ok(det)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;
    use qfix_math::Q15_16;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type M = Matrix<Q15_16>;

    const METHODS: [DeterminantMethod; 2] = [DeterminantMethod::PivotedLu, DeterminantMethod::Laplace];

    #[test]
    fn test_worked_example() {
        let a = M::from_rows(&[&[2.0, 3.0, 1.0], &[4.0, 4.0, 2.0], &[1.0, 1.0, 1.0]]).unwrap();
        for method in METHODS {
            assert_eq!(a.determinant_with(method).unwrap().to_float(), -2.0, "{}", method);
        }
    }

    #[test]
    fn test_identity_is_one() {
        for n in 1..8 {
            let i = M::identity(n).unwrap();
            assert_eq!(i.determinant().unwrap(), Fixed::one());
            assert_eq!(i.determinant_with(DeterminantMethod::Laplace).unwrap(), Fixed::one());
        }
    }

    #[test]
    fn test_singular_is_zero() {
        let a = M::from_rows(&[&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &[0.0, 1.0, 1.0]]).unwrap();
        for method in METHODS {
            assert!(a.determinant_with(method).unwrap().is_zero());
        }
        let zero = M::square(4).unwrap();
        assert!(zero.determinant().unwrap().is_zero());
    }

    #[test]
    fn test_row_swap_flips_sign() {
        let a = M::from_rows(&[&[0.0, 2.0], &[3.0, 1.0]]).unwrap();
        assert_eq!(a.determinant().unwrap().to_float(), -6.0);
        assert_eq!(a.determinant_with(DeterminantMethod::Laplace).unwrap().to_float(), -6.0);
    }

    #[test]
    fn test_methods_agree_on_random() {
        let mut rng = StdRng::seed_from_u64(5);
        for n in 1..6 {
            let mut a = M::square(n).unwrap();
            a.fill_random_f64(&mut rng, -3.0, 3.0).unwrap();
            let plu = a.determinant().unwrap().to_float();
            let laplace = a.determinant_with(DeterminantMethod::Laplace).unwrap().to_float();
            assert!(
                (plu - laplace).abs() <= 0.05 * plu.abs().max(1.0),
                "n={} plu={} laplace={}",
                n,
                plu,
                laplace
            );
        }
    }

    #[test]
    fn test_requires_square() {
        let a = M::new(2, 3).unwrap();
        assert!(matches!(a.determinant(), Err(MatrixError::NotSquare { .. })));
    }

    #[test]
    fn test_method_serde() {
        let json = serde_json::to_string(&DeterminantMethod::PivotedLu).unwrap();
        assert_eq!(json, "\"pivoted-lu\"");
        let back: DeterminantMethod = serde_json::from_str("\"laplace\"").unwrap();
        assert_eq!(back, DeterminantMethod::Laplace);
        assert_eq!(DeterminantMethod::default(), DeterminantMethod::PivotedLu);
    }
}
