// ============================================================================
// Pi Computer
// Drives one strategy from configuration to extracted mantissa bytes
// ============================================================================

use super::errors::SummationError;
use super::extract::{extract_with, Extraction};
use super::summation::SummationEngine;
use super::{ExactTerms, IncrementalTerms, RecomputeTerms};
use crate::domain::{ComputeConfig, PiDigits, RunId, SeriesParameters, TermStrategy};
use crate::interfaces::{EventHandler, SummationEvent, TermSource};
use crate::numeric::PrecisionContext;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Configured pi computation for a single term strategy
pub struct PiComputer {
    config: ComputeConfig,
    engine: SummationEngine,
}

impl PiComputer {
    /// Create a new computer from a validated configuration.
    /// Use [`create_from_config`](super::create_from_config) or the builder.
    pub(crate) fn new(config: ComputeConfig, event_handler: Arc<dyn EventHandler>) -> Self {
        let engine =
            SummationEngine::new(event_handler).with_reduction_order(config.reduction_order);
        Self { config, engine }
    }

    pub fn config(&self) -> &ComputeConfig {
        &self.config
    }

    pub fn parameters(&self) -> SeriesParameters {
        self.config.parameters()
    }

    /// Sum the series and extract the leading `output_bits` bits
    pub fn run(&self) -> Result<PiDigits, SummationError> {
        let parameters = self.parameters();
        let run_id = RunId::new();
        let started = Instant::now();

        let extraction = match self.config.strategy {
            TermStrategy::Recompute => {
                let ctx = PrecisionContext::new(parameters.precision_bits)?;
                self.sum_and_extract(run_id, &parameters, &RecomputeTerms::new(ctx))?
            },
            TermStrategy::Incremental => {
                let ctx = PrecisionContext::new(parameters.precision_bits)?;
                let source = IncrementalTerms::new(ctx, parameters.term_count)?;
                self.sum_and_extract(run_id, &parameters, &source)?
            },
            TermStrategy::ExactRational => {
                self.sum_and_extract(run_id, &parameters, &ExactTerms::new())?
            },
        };

        Ok(self.finish(run_id, parameters, extraction, started))
    }

    /// [`run`](Self::run) with the terms computed through a tokio future set
    #[cfg(feature = "async")]
    pub async fn run_async(&self) -> Result<PiDigits, SummationError> {
        let parameters = self.parameters();
        let run_id = RunId::new();
        let started = Instant::now();
        let policy = self.config.overflow_policy;
        let n = parameters.term_count;

        let extraction = match self.config.strategy {
            TermStrategy::Recompute => {
                let ctx = PrecisionContext::new(parameters.precision_bits)?;
                let source = Arc::new(RecomputeTerms::new(ctx));
                let sum = self.engine.sum_async_with_id(run_id, n, source).await?;
                extract_with(&sum, parameters.output_bits, policy)?
            },
            TermStrategy::Incremental => {
                let ctx = PrecisionContext::new(parameters.precision_bits)?;
                let source = Arc::new(IncrementalTerms::new(ctx, n)?);
                let sum = self.engine.sum_async_with_id(run_id, n, source).await?;
                extract_with(&sum, parameters.output_bits, policy)?
            },
            TermStrategy::ExactRational => {
                let source = Arc::new(ExactTerms::new());
                let sum = self.engine.sum_async_with_id(run_id, n, source).await?;
                extract_with(&sum, parameters.output_bits, policy)?
            },
        };

        Ok(self.finish(run_id, parameters, extraction, started))
    }

    fn sum_and_extract<S: TermSource>(
        &self,
        run_id: RunId,
        parameters: &SeriesParameters,
        source: &S,
    ) -> Result<Extraction, SummationError> {
        let sum = self
            .engine
            .sum_with_id(run_id, parameters.term_count, source)?;
        Ok(extract_with(
            &sum,
            parameters.output_bits,
            self.config.overflow_policy,
        )?)
    }

    fn finish(
        &self,
        run_id: RunId,
        parameters: SeriesParameters,
        extraction: Extraction,
        started: Instant,
    ) -> PiDigits {
        let elapsed = started.elapsed();

        tracing::debug!(
            run_id = %run_id.as_uuid(),
            strategy = self.config.strategy.name(),
            digits = parameters.decimal_digits,
            hex_digits = parameters.term_count,
            output_bits = parameters.output_bits,
            precision_bits = parameters.precision_bits,
            exponent = extraction.exponent,
            bit_len = extraction.bit_len,
            ?elapsed,
            "pi digits extracted"
        );
        self.engine
            .event_handler()
            .on_event(SummationEvent::DigitsExtracted {
                run_id,
                output_bits: parameters.output_bits,
                bit_len: extraction.bit_len,
                timestamp: Utc::now(),
            });

        PiDigits {
            run_id,
            strategy: self.config.strategy,
            parameters,
            mantissa: extraction.mantissa,
            exponent: extraction.exponent,
            bit_len: extraction.bit_len,
            elapsed,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OverflowPolicy;
    use crate::interfaces::{NoOpEventHandler, RecordingEventHandler};
    use crate::numeric::NumericError;

    #[test]
    fn test_run_recompute() {
        let computer = PiComputer::new(
            ComputeConfig::quick(TermStrategy::Recompute),
            Arc::new(NoOpEventHandler),
        );
        let digits = computer.run().unwrap();
        assert_eq!(
            digits.as_bytes(),
            &[0xc9, 0x0f, 0xda, 0xa2, 0x21, 0x68, 0xc2, 0x34]
        );
        assert_eq!(digits.exponent, 2);
        assert_eq!(digits.bit_len, 64);
        assert_eq!(digits.strategy, TermStrategy::Recompute);
    }

    #[test]
    fn test_digits_extracted_event() {
        let handler = Arc::new(RecordingEventHandler::new());
        let computer = PiComputer::new(ComputeConfig::new(16, TermStrategy::Incremental), handler.clone());
        let digits = computer.run().unwrap();

        let events = handler.events();
        assert!(matches!(
            events.last(),
            Some(SummationEvent::DigitsExtracted { output_bits: 16, bit_len: 16, .. })
        ));
        assert!(events.iter().all(|e| e.run_id() == digits.run_id));
    }

    #[test]
    fn test_partial_byte_output_policies() {
        let rejecting = PiComputer::new(
            ComputeConfig::new(12, TermStrategy::ExactRational),
            Arc::new(NoOpEventHandler),
        );
        assert_eq!(
            rejecting.run().unwrap_err(),
            SummationError::Numeric(NumericError::CapacityExceeded {
                required_bits: 12,
                available_bits: 8
            })
        );

        // pi = 0b1100_1001_0000_1111... -> top 12 bits 0xc90, low byte 0x90
        let truncating = PiComputer::new(
            ComputeConfig::new(12, TermStrategy::ExactRational)
                .with_overflow_policy(OverflowPolicy::TruncateHigh),
            Arc::new(NoOpEventHandler),
        );
        let digits = truncating.run().unwrap();
        assert_eq!(digits.as_bytes(), &[0x90]);
        assert_eq!(digits.bit_len, 12);
    }
}
