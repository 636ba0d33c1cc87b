// ============================================================================
// Recompute Strategy
// Stateless terms that rebuild 16^i from scratch on every call
// ============================================================================

use super::kernel;
use crate::domain::TermStrategy;
use crate::interfaces::TermSource;
use crate::numeric::{BigFloat, NumericResult, PrecisionContext};

/// Naive baseline: O(i) multiplications per term.
#[derive(Debug, Clone)]
pub struct RecomputeTerms {
    ctx: PrecisionContext,
}

impl RecomputeTerms {
    pub fn new(ctx: PrecisionContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &PrecisionContext {
        &self.ctx
    }

    /// `16^index` by repeated multiplication starting from one.
    fn power(&self, index: usize) -> NumericResult<BigFloat> {
        let mut power = self.ctx.one.clone();
        for _ in 0..index {
            power = power.checked_mul(&self.ctx.sixteen)?;
        }
        Ok(power)
    }
}

impl TermSource for RecomputeTerms {
    type Value = BigFloat;

    fn term(&self, index: usize) -> NumericResult<BigFloat> {
        let power = self.power(index)?;
        kernel::numerator(&self.ctx, index)?.checked_div(&power)
    }

    fn zero(&self) -> BigFloat {
        self.ctx.zero()
    }

    fn strategy(&self) -> TermStrategy {
        TermStrategy::Recompute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_is_exact() {
        let terms = RecomputeTerms::new(PrecisionContext::new(8).unwrap());
        let power = terms.power(40).unwrap();
        // 16^40 = 2^160: a single bit, exact even at 8 bits
        assert_eq!(power.binary_exponent(), 161);
        assert_eq!(power.exponent(), 160);
    }

    #[test]
    fn test_terms_shrink_by_sixteen() {
        let terms = RecomputeTerms::new(PrecisionContext::new(96).unwrap());
        let t0 = terms.term(0).unwrap().to_f64();
        let t1 = terms.term(1).unwrap().to_f64();
        let t2 = terms.term(2).unwrap().to_f64();
        assert!(t0 > 3.0 && t0 < 3.2);
        assert!(t1 < t0 / 16.0 && t2 < t1 / 16.0);
        assert_eq!(terms.term(5).unwrap().precision(), 96);
    }
}
