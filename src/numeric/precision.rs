// ============================================================================
// Precision Context
// Shared bit precision plus the small constants the BBP kernel needs
// ============================================================================

use super::big_float::BigFloat;
use super::errors::{NumericError, NumericResult};

/// Immutable bit precision with the BBP constants pre-rendered at it.
///
/// Every value built through a context carries the same precision, which is
/// what keeps a summation free of `PrecisionMismatch` errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionContext {
    bits: u32,
    zero: BigFloat,
    pub one: BigFloat,
    pub two: BigFloat,
    pub four: BigFloat,
    pub five: BigFloat,
    pub six: BigFloat,
    pub eight: BigFloat,
    pub sixteen: BigFloat,
}

impl PrecisionContext {
    /// Build the constant pool at `bits` precision.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` if `bits` is zero.
    pub fn new(bits: u32) -> NumericResult<Self> {
        if bits == 0 {
            return Err(NumericError::InvalidPrecision);
        }

        Ok(Self {
            bits,
            zero: BigFloat::zero(bits)?,
            one: BigFloat::from_i64(1, bits)?,
            two: BigFloat::from_i64(2, bits)?,
            four: BigFloat::from_i64(4, bits)?,
            five: BigFloat::from_i64(5, bits)?,
            six: BigFloat::from_i64(6, bits)?,
            eight: BigFloat::from_i64(8, bits)?,
            sixteen: BigFloat::from_i64(16, bits)?,
        })
    }

    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Zero at this context's precision.
    pub fn zero(&self) -> BigFloat {
        self.zero.clone()
    }

    /// Render a term index at this context's precision.
    pub fn index(&self, index: usize) -> NumericResult<BigFloat> {
        BigFloat::from_i64(index as i64, self.bits)
    }
}
