// ============================================================================
// Pi Computer Factory
// Creates pi computers with proper configuration
// ============================================================================

use super::errors::SummationError;
use super::pi_computer::PiComputer;
use crate::domain::config::{ComputeConfig, OverflowPolicy, ReductionOrder, TermStrategy};
use crate::domain::PiDigits;
use crate::interfaces::EventHandler;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a pi computer from configuration
///
/// # Arguments
/// * `config` - Computation configuration
/// * `event_handler` - Event handler for summation events
///
/// # Returns
/// * `Result<PiComputer, String>` - Configured computer or error
///
/// # Example
/// ```
/// use bbp_pi::prelude::*;
/// use bbp_pi::engine::factory::create_from_config;
/// use std::sync::Arc;
///
/// let config = ComputeConfig::quick(TermStrategy::Incremental);
/// let computer = create_from_config(config, Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(computer.parameters().term_count, 17);
/// ```
pub fn create_from_config(
    config: ComputeConfig,
    event_handler: Arc<dyn EventHandler>,
) -> Result<PiComputer, String> {
    config.validate()?;
    Ok(PiComputer::new(config, event_handler))
}

/// Validate, build and run a single computation
pub fn compute(
    config: ComputeConfig,
    event_handler: Arc<dyn EventHandler>,
) -> Result<PiDigits, SummationError> {
    create_from_config(config, event_handler)
        .map_err(SummationError::InvalidConfig)?
        .run()
}

/// Run every strategy for the same output size, in [`TermStrategy::ALL`] order
pub fn compute_all(
    output_bits: u32,
    event_handler: Arc<dyn EventHandler>,
) -> Result<Vec<PiDigits>, SummationError> {
    TermStrategy::ALL
        .iter()
        .map(|strategy| {
            compute(
                ComputeConfig::new(output_bits, *strategy),
                Arc::clone(&event_handler),
            )
        })
        .collect()
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating pi computers with fluent API
///
/// # Example
/// ```
/// use bbp_pi::prelude::*;
/// use bbp_pi::engine::factory::PiComputerBuilder;
/// use std::sync::Arc;
///
/// let digits = PiComputerBuilder::new(32)
///     .incremental()
///     .reduce_by_index()
///     .build(Arc::new(NoOpEventHandler))
///     .unwrap()
///     .run()
///     .unwrap();
/// assert_eq!(digits.as_bytes(), &[0xc9, 0x0f, 0xda, 0xa2]);
/// ```
pub struct PiComputerBuilder {
    config: ComputeConfig,
}

impl PiComputerBuilder {
    /// Create a new builder for the given output size in bits
    pub fn new(output_bits: u32) -> Self {
        Self {
            config: ComputeConfig::new(output_bits, TermStrategy::Incremental),
        }
    }

    /// Create a new builder for the given output size in bytes
    pub fn from_bytes(n_bytes: u32) -> Self {
        Self {
            config: ComputeConfig::from_bytes(n_bytes, TermStrategy::Incremental),
        }
    }

    // ========================================================================
    // Strategy Configuration
    // ========================================================================

    /// Recompute every power of sixteen per term
    pub fn recompute(mut self) -> Self {
        self.config.strategy = TermStrategy::Recompute;
        self
    }

    /// Precompute powers of sixteen in one pass (default)
    pub fn incremental(mut self) -> Self {
        self.config.strategy = TermStrategy::Incremental;
        self
    }

    /// Exact rational arithmetic
    pub fn exact_rational(mut self) -> Self {
        self.config.strategy = TermStrategy::ExactRational;
        self
    }

    pub fn strategy(mut self, strategy: TermStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    // ========================================================================
    // Reduction and Extraction
    // ========================================================================

    /// Add terms in arrival order (default)
    pub fn reduce_on_arrival(mut self) -> Self {
        self.config.reduction_order = ReductionOrder::Arrival;
        self
    }

    /// Add terms in index order for bit-reproducible sums
    pub fn reduce_by_index(mut self) -> Self {
        self.config.reduction_order = ReductionOrder::ByIndex;
        self
    }

    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the pi computer
    pub fn build(self, event_handler: Arc<dyn EventHandler>) -> Result<PiComputer, String> {
        create_from_config(self.config, event_handler)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &ComputeConfig {
        &self.config
    }
}
