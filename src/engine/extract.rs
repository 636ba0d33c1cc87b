// ============================================================================
// Mantissa Extraction
// Leading bits of a high-precision sum as fixed-width big-endian bytes
// ============================================================================

use crate::domain::{MantissaBuffer, OverflowPolicy};
use crate::numeric::{NumericResult, SeriesValue};

/// Extracted mantissa plus the diagnostics of the extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// `output_bits / 8` bytes, big-endian
    pub mantissa: MantissaBuffer,
    /// Binary exponent of the source value
    pub exponent: i64,
    /// Bit length of the truncated integer
    pub bit_len: u64,
}

/// Leading `output_bits` bits of `|value|` in `output_bits / 8` bytes.
///
/// The value is scaled by `2^(output_bits - exponent)` so that exactly
/// `output_bits` significant bits sit above the binary point, then truncated.
///
/// # Errors
/// Returns `CapacityExceeded` when the truncated integer is wider than the
/// buffer (only possible when `output_bits` is not a multiple of 8).
pub fn extract<V: SeriesValue>(value: &V, output_bits: u32) -> NumericResult<MantissaBuffer> {
    extract_with(value, output_bits, OverflowPolicy::Reject).map(|e| e.mantissa)
}

/// [`extract`] with an explicit overflow policy and full diagnostics.
pub fn extract_with<V: SeriesValue>(
    value: &V,
    output_bits: u32,
    policy: OverflowPolicy,
) -> NumericResult<Extraction> {
    let exponent = value.binary_exponent();
    let integer = value.scaled_magnitude(i64::from(output_bits) - exponent);
    let bit_len = integer.bits();

    let mantissa = MantissaBuffer::from_integer(&integer, (output_bits / 8) as usize, policy)?;

    Ok(Extraction {
        mantissa,
        exponent,
        bit_len,
    })
}
