//! Gaussian-elimination factorizations.
//!
//! - [`Lu`]: Doolittle `A = L·U` without pivoting
//! - [`Plu`]: partial pivoting, `P·A = L·U`, so `A = Pᵀ·L·U`
//!
//! `L` is unit lower-triangular and `U` upper-triangular. Entries below the
//! diagonal of `U` are set to exact zeros rather than left as the rounded
//! remainder of the elimination.

use log::debug;
use qfix_math::{Fixed, QFormat};

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

/// Unpivoted factors: `A = l · u`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lu<Q: QFormat> {
    pub l: Matrix<Q>,
    pub u: Matrix<Q>,
}

/// Pivoted factors: `p · A = l · u`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plu<Q: QFormat> {
    pub p: Matrix<Q>,
    pub l: Matrix<Q>,
    pub u: Matrix<Q>,
    /// Number of row exchanges performed while pivoting.
    pub swaps: usize,
}

impl<Q: QFormat> Lu<Q> {
    /// `l · u`.
    pub fn reconstruct(&self) -> Result<Matrix<Q>> {
        self.l.dot(&self.u)
    }
}

impl<Q: QFormat> Plu<Q> {
    /// `pᵀ · l · u`, which approximates the decomposed matrix.
    pub fn reconstruct(&self) -> Result<Matrix<Q>> {
        self.p.transpose().dot(&self.l)?.dot(&self.u)
    }

    /// `+1` for an even number of row exchanges, `-1` for odd.
    pub fn permutation_sign(&self) -> Fixed<Q> {
        if self.swaps % 2 == 0 {
            Fixed::one()
        } else {
            Fixed::minus_one()
        }
    }
}

/// Outcome of pivoted elimination. `singular_at` is the first column whose
/// candidate pivots are all zero; elimination stops there.
pub(crate) struct Elimination<Q: QFormat> {
    pub(crate) plu: Plu<Q>,
    pub(crate) singular_at: Option<usize>,
}

/// `u[j][i+1..] -= factor · u[i][i+1..]` and `u[j][i] = 0`.
fn eliminate_row<Q: QFormat>(u: &mut Matrix<Q>, i: usize, j: usize, factor: Fixed<Q>) {
    u[(j, i)] = Fixed::zero();
    for k in i + 1..u.cols() {
        let delta = factor * u[(i, k)];
        u[(j, k)] -= delta;
    }
}

impl<Q: QFormat> Matrix<Q> {
    /// Doolittle LU into caller-owned `l` and `u` (both `n x n`).
    ///
    /// Fails with `Singular` when a pivot `u[i][i]` is zero; the matrix may
    /// still be invertible, in which case [`Matrix::plu`] succeeds.
    pub fn lu_decompose_into(&self, l: &mut Self, u: &mut Self) -> Result<()> {
        let n = self.ensure_square("LU decomposition")?;
        l.ensure_shape("LU decomposition", n, n)?;
        self.copy_into(u)?;
        l.fill_identity()?;

        for i in 0..n {
            let pivot = u[(i, i)];
            if pivot.is_zero() {
                return Err(MatrixError::Singular { pivot: i });
            }
            for j in i + 1..n {
                let factor = u[(j, i)].divide(pivot)?;
                l[(j, i)] = factor;
                eliminate_row(u, i, j, factor);
            }
        }
        Ok(())
    }

    pub fn lu(&self) -> Result<Lu<Q>> {
        let n = self.ensure_square("LU decomposition")?;
        let mut l = Self::zeroed(n, n);
        let mut u = Self::zeroed(n, n);
        self.lu_decompose_into(&mut l, &mut u)?;
        Ok(Lu { l, u })
    }

    /// PLU into caller-owned `p`, `l` and `u`. Returns the number of row
    /// exchanges.
    pub fn plu_decompose_into(&self, p: &mut Self, l: &mut Self, u: &mut Self) -> Result<usize> {
        let plu = self.plu()?;
        plu.p.copy_into(p)?;
        plu.l.copy_into(l)?;
        plu.u.copy_into(u)?;
        Ok(plu.swaps)
    }

    /// Partial-pivoting LU. Fails with `Singular` if a column has no
    /// non-zero pivot candidate.
    pub fn plu(&self) -> Result<Plu<Q>> {
        let elim = self.pivoted_elimination()?;
        match elim.singular_at {
            Some(pivot) => Err(MatrixError::Singular { pivot }),
            None => Ok(elim.plu),
        }
    }

    pub(crate) fn pivoted_elimination(&self) -> Result<Elimination<Q>> {
        let n = self.ensure_square("PLU decomposition")?;
        let mut p = Self::zeroed(n, n);
        p.fill_identity()?;
        let mut l = p.clone();
        let mut u = self.clone();
        let mut swaps = 0;

        for i in 0..n {
            // First maximal |u[r][i]| for r >= i. Ranked on the raw
            // magnitude so a min_value() entry is never passed over.
            let mut best = i;
            let mut best_mag = u[(i, i)].magnitude();
            for r in i + 1..n {
                let mag = u[(r, i)].magnitude();
                if mag > best_mag {
                    best = r;
                    best_mag = mag;
                }
            }

            if best != i {
                u.swap_rows(i, best)?;
                p.swap_rows(i, best)?;
                // Multipliers already stored for earlier columns move with
                // their rows.
                for k in 0..i {
                    let tmp = l[(i, k)];
                    l[(i, k)] = l[(best, k)];
                    l[(best, k)] = tmp;
                }
                swaps += 1;
                debug!("PLU: swapped rows {} and {} for column {}", i, best, i);
            }

            let pivot = u[(i, i)];
            if pivot.is_zero() {
                debug!("PLU: column {} has no non-zero pivot", i);
                return Ok(Elimination {
                    plu: Plu { p, l, u, swaps },
                    singular_at: Some(i),
                });
            }

            for j in i + 1..n {
                let factor = u[(j, i)].divide(pivot)?;
                l[(j, i)] = factor;
                eliminate_row(&mut u, i, j, factor);
            }
        }

        debug!("PLU: decomposed {}x{} matrix with {} row swaps", n, n, swaps);
        Ok(Elimination {
            plu: Plu { p, l, u, swaps },
            singular_at: None,
        })
    }
}
