// ============================================================================
// Exact Rational Values
// SeriesValue support for unbounded numerator/denominator fractions
// ============================================================================

use super::errors::NumericResult;
use super::series_value::SeriesValue;
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::Zero;

/// Exact rational from a machine integer.
#[inline]
pub fn rational(value: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}

impl SeriesValue for BigRational {
    fn accumulate(&mut self, term: Self) -> NumericResult<()> {
        *self += term;
        Ok(())
    }

    fn binary_exponent(&self) -> i64 {
        if self.numer().is_zero() {
            return 0;
        }

        let numer = self.numer().magnitude();
        let denom = self.denom().magnitude();

        // |v| < 2^(bits(n) - bits(d) + 1) always; one step lower is possible.
        let candidate = numer.bits() as i64 - denom.bits() as i64;
        let below = if candidate >= 0 {
            numer < &(denom << candidate as u64)
        } else {
            &(numer << candidate.unsigned_abs()) < denom
        };

        if below {
            candidate
        } else {
            candidate + 1
        }
    }

    fn scaled_magnitude(&self, shift: i64) -> BigUint {
        let numer = self.numer().magnitude();
        let denom = self.denom().magnitude();
        if shift >= 0 {
            (numer << shift as u64) / denom
        } else {
            numer / (denom << shift.unsigned_abs())
        }
    }
}
