// ============================================================================
// Exact Rational Strategy
// Terms as unbounded fractions, never rounded
// ============================================================================

use super::kernel;
use crate::domain::TermStrategy;
use crate::interfaces::TermSource;
use crate::numeric::{rational, BigRational, NumericResult};
use num_bigint::BigInt;

/// Exact terms for cross-checking the fixed-precision strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTerms;

impl ExactTerms {
    pub fn new() -> Self {
        Self
    }
}

impl TermSource for ExactTerms {
    type Value = BigRational;

    fn term(&self, index: usize) -> NumericResult<BigRational> {
        let power = num_traits::pow(BigInt::from(16), index);
        Ok(kernel::numerator_exact(index) / BigRational::from_integer(power))
    }

    fn zero(&self) -> BigRational {
        rational(0)
    }

    fn strategy(&self) -> TermStrategy {
        TermStrategy::ExactRational
    }
}
