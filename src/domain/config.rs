// ============================================================================
// Computation Configuration
// Output size, term strategy and reduction behavior for a pi run
// ============================================================================

use super::parameters::{derive_parameters, SeriesParameters};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Term Strategy
// ============================================================================

/// Defines how individual series terms are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TermStrategy {
    /// Recompute `16^i` from scratch for every term
    /// - O(i) multiplications per term
    /// - Stateless baseline
    Recompute,

    /// Precompute every `16^i` in one sequential pass
    /// - O(n) multiplications overall
    /// - Bit-identical to `Recompute`
    Incremental,

    /// Exact fractions, no rounding
    /// - Unbounded numerator/denominator growth
    /// - Used to cross-check the fixed-precision paths
    ExactRational,
}

impl TermStrategy {
    /// All strategies in the order a full run executes them
    pub const ALL: [TermStrategy; 3] = [
        TermStrategy::Recompute,
        TermStrategy::Incremental,
        TermStrategy::ExactRational,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TermStrategy::Recompute => "recompute",
            TermStrategy::Incremental => "incremental",
            TermStrategy::ExactRational => "exact-rational",
        }
    }
}

// ============================================================================
// Reduction Order
// ============================================================================

/// Order in which partial results are added into the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReductionOrder {
    /// Add each term as it arrives from the workers.
    /// Fixed-precision sums may differ in their last guard bits between runs.
    #[default]
    Arrival,

    /// Collect every term, then add them in index order.
    /// Fixed-precision sums are bit-reproducible.
    ByIndex,
}

// ============================================================================
// Overflow Policy
// ============================================================================

/// What to do when the extracted integer is wider than the output buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverflowPolicy {
    /// Fail with `CapacityExceeded`
    #[default]
    Reject,

    /// Keep the low-order bytes and drop the high-order bits
    TruncateHigh,
}

// ============================================================================
// Complete Computation Configuration
// ============================================================================

/// Comprehensive configuration for one pi computation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComputeConfig {
    /// Desired bit length of the output digit string (`nb`)
    pub output_bits: u32,

    /// Term generation strategy
    pub strategy: TermStrategy,

    /// Reduction order for the accumulator
    pub reduction_order: ReductionOrder,

    /// Behavior when the mantissa does not fit the buffer
    pub overflow_policy: OverflowPolicy,
}

impl ComputeConfig {
    /// Create a new configuration with required parameters
    pub fn new(output_bits: u32, strategy: TermStrategy) -> Self {
        Self {
            output_bits,
            strategy,
            reduction_order: ReductionOrder::Arrival,
            overflow_policy: OverflowPolicy::Reject,
        }
    }

    /// Create a configuration for an output buffer of `n_bytes` bytes
    pub fn from_bytes(n_bytes: u32, strategy: TermStrategy) -> Self {
        Self::new(n_bytes.saturating_mul(8), strategy)
    }

    /// Builder method: Set reduction order
    pub fn with_reduction_order(mut self, order: ReductionOrder) -> Self {
        self.reduction_order = order;
        self
    }

    /// Builder method: Set overflow policy
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Builder method: Set term strategy
    pub fn with_strategy(mut self, strategy: TermStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Derived precision, term count and decimal digits
    pub fn parameters(&self) -> SeriesParameters {
        derive_parameters(self.output_bits)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.output_bits < 8 {
            return Err("Output bits must be at least 8".to_string());
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl ComputeConfig {
    /// 64-byte (512-bit) output
    pub fn reference(strategy: TermStrategy) -> Self {
        Self::from_bytes(64, strategy)
    }

    /// 8-byte (64-bit) output
    pub fn quick(strategy: TermStrategy) -> Self {
        Self::from_bytes(8, strategy)
    }

    /// Bit-reproducible fixed-precision configuration
    pub fn reproducible(output_bits: u32, strategy: TermStrategy) -> Self {
        Self::new(output_bits, strategy).with_reduction_order(ReductionOrder::ByIndex)
    }
}
