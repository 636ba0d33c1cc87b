// ============================================================================
// Series Value
// Contract shared by every number kind a summation can accumulate
// ============================================================================

use super::errors::NumericResult;
use num_bigint::BigUint;

/// A number that can be accumulated by the summation engine and then read
/// back as a fixed-width mantissa.
///
/// Implemented by [`BigFloat`](super::BigFloat) (rounds on every operation)
/// and by [`BigRational`](num_rational::BigRational) (exact, never rounds).
pub trait SeriesValue: Clone + Send + 'static {
    /// Add `term` into `self`.
    fn accumulate(&mut self, term: Self) -> NumericResult<()>;

    /// Exponent `e` such that `2^(e-1) <= |self| < 2^e`, or zero for zero.
    fn binary_exponent(&self) -> i64;

    /// `floor(|self| × 2^shift)`.
    fn scaled_magnitude(&self, shift: i64) -> BigUint;
}
