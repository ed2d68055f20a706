use rand::Rng;

use crate::fixed_point::{Fixed, FixedPointError, Result};
use crate::format::QFormat;
use crate::storage::Storage;

impl<Q: QFormat> Fixed<Q> {
    /// Uniform draw over the raw values in `[min, max]` (both inclusive).
    pub fn random_in<R: Rng + ?Sized>(rng: &mut R, min: Self, max: Self) -> Result<Self> {
        if min > max {
            return Err(FixedPointError::InvalidRange {
                min: min.raw().as_i64(),
                max: max.raw().as_i64(),
            });
        }
        Ok(Self::from_raw(rng.gen_range(min.raw()..=max.raw())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Q15_16, Q7_8};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let min = Fixed::<Q15_16>::from_int(-100);
        let max = Fixed::<Q15_16>::from_int(100);
        for _ in 0..1000 {
            let x = Fixed::random_in(&mut rng, min, max).unwrap();
            assert!(x >= min && x <= max);
        }
    }

    #[test]
    fn test_random_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let v = Fixed::<Q7_8>::from_float(1.5);
        assert_eq!(Fixed::random_in(&mut rng, v, v).unwrap(), v);
    }

    #[test]
    fn test_random_inverted_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let lo = Fixed::<Q15_16>::one();
        let hi = Fixed::<Q15_16>::two();
        assert!(matches!(
            Fixed::random_in(&mut rng, hi, lo),
            Err(FixedPointError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_random_deterministic_with_seed() {
        let min = Fixed::<Q15_16>::from_int(-10);
        let max = Fixed::<Q15_16>::from_int(10);
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..16)
                .map(|_| Fixed::random_in(&mut rng, min, max).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }
}
