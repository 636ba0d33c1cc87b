// ============================================================================
// Incremental Strategy
// Terms backed by precomputed per-index powers of sixteen
// ============================================================================

use super::kernel;
use crate::domain::{TermState, TermStrategy};
use crate::interfaces::TermSource;
use crate::numeric::{BigFloat, NumericError, NumericResult, PrecisionContext};

/// Term generator whose `16^i` divisors come from one sequential pass.
///
/// `new` performs exactly `n - 1` multiplications in total; each worker then
/// reads its own [`TermState`] and never touches another index's state.
#[derive(Debug, Clone)]
pub struct IncrementalTerms {
    ctx: PrecisionContext,
    states: Vec<TermState>,
}

impl IncrementalTerms {
    /// Precompute the state records for indices `0..term_count`.
    pub fn new(ctx: PrecisionContext, term_count: usize) -> NumericResult<Self> {
        let mut states = Vec::with_capacity(term_count);
        let mut power = ctx.one.clone();

        for index in 0..term_count {
            let next = if index + 1 < term_count {
                Some(power.checked_mul(&ctx.sixteen)?)
            } else {
                None
            };
            states.push(TermState::new(index, power));
            match next {
                Some(next) => power = next,
                None => break,
            }
        }

        tracing::trace!(term_count, bits = ctx.bits(), "incremental term states prepared");
        Ok(Self { ctx, states })
    }

    pub fn states(&self) -> &[TermState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Worker function: evaluate one precomputed record.
    pub fn evaluate(&self, state: &TermState) -> NumericResult<BigFloat> {
        let value = kernel::numerator(&self.ctx, state.index)?;
        if state.needs_division() {
            value.checked_div(&state.power)
        } else {
            Ok(value)
        }
    }
}

impl TermSource for IncrementalTerms {
    type Value = BigFloat;

    fn term(&self, index: usize) -> NumericResult<BigFloat> {
        let state = self
            .states
            .get(index)
            .ok_or(NumericError::IndexOutOfRange {
                index,
                len: self.states.len(),
            })?;
        self.evaluate(state)
    }

    fn zero(&self) -> BigFloat {
        self.ctx.zero()
    }

    fn strategy(&self) -> TermStrategy {
        TermStrategy::Incremental
    }
}
