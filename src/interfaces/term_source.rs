// ============================================================================
// Term Source Interface
// Defines the contract for pluggable term generation strategies
// ============================================================================

use crate::domain::TermStrategy;
use crate::numeric::{NumericResult, SeriesValue};

/// Strategy pattern interface for series term generators
/// Implementations: RecomputeTerms, IncrementalTerms, ExactTerms
///
/// A source is shared read-only by every worker of a summation, so `term`
/// takes `&self` and must not rely on interior mutation.
pub trait TermSource: Send + Sync {
    /// Number kind produced and accumulated
    type Value: SeriesValue;

    /// Compute the series contribution of `index`
    ///
    /// # Arguments
    /// * `index` - Term index, `0 <= index < n`
    ///
    /// # Returns
    /// The term `(4/(8i+1) - 2/(8i+4) - 1/(8i+5) - 1/(8i+6)) / 16^i`
    fn term(&self, index: usize) -> NumericResult<Self::Value>;

    /// Initial accumulator value, compatible with every term
    fn zero(&self) -> Self::Value;

    /// Which strategy this source implements
    fn strategy(&self) -> TermStrategy;

    /// Get the strategy name for logging
    fn name(&self) -> &str {
        self.strategy().name()
    }
}
