// ============================================================================
// Term State
// Per-index record for the incremental term generator
// ============================================================================

use crate::numeric::BigFloat;

/// Precomputed state for one series index: the index and `16^index` at the
/// run's precision.
///
/// Built by a single sequential pass and then handed to concurrent workers as
/// plain read-only data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermState {
    pub index: usize,
    pub power: BigFloat,
}

impl TermState {
    pub fn new(index: usize, power: BigFloat) -> Self {
        Self { index, power }
    }

    /// Index 0 has divisor `16^0 = 1` and is never divided.
    #[inline]
    pub fn needs_division(&self) -> bool {
        self.index != 0
    }
}
