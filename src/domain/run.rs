// ============================================================================
// Run Results
// Identifiers and the outcome of a completed pi computation
// ============================================================================

use super::config::TermStrategy;
use super::mantissa::MantissaBuffer;
use super::parameters::SeriesParameters;
use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// Correlates every event emitted by one summation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Pi Digits
// ============================================================================

/// Leading binary digits of pi produced by one strategy
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PiDigits {
    /// Run that produced these digits
    pub run_id: RunId,

    /// Strategy used to generate the terms
    pub strategy: TermStrategy,

    /// Derived precision, term count and decimal digits
    pub parameters: SeriesParameters,

    /// Leading `output_bits` bits of the sum, big-endian
    pub mantissa: MantissaBuffer,

    /// Binary exponent of the sum (2 for pi)
    pub exponent: i64,

    /// Bit length of the extracted integer before serialization
    pub bit_len: u64,

    /// Wall time spent summing and extracting
    pub elapsed: Duration,

    /// Completion timestamp
    pub completed_at: DateTime<Utc>,
}

impl PiDigits {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.mantissa.as_bytes()
    }
}
