// ============================================================================
// Series Parameters
// Derivation of precision, term count and decimal digits from output bits
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extra bits carried beyond the output length to absorb rounding error.
pub const GUARD_BITS: u32 = 32;

/// Each BBP term contributes one hexadecimal digit.
pub const BITS_PER_TERM: u32 = 4;

/// Everything a run needs to know, derived from the requested output bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeriesParameters {
    /// Requested bit length of the output digit string (`nb`)
    pub output_bits: u32,
    /// Working precision including guard bits (`p`)
    pub precision_bits: u32,
    /// Number of series terms to sum (`n`)
    pub term_count: usize,
    /// Decimal digits the output bits correspond to (`nd`)
    pub decimal_digits: usize,
}

impl SeriesParameters {
    /// Length of the mantissa buffer in bytes.
    #[inline]
    pub fn output_bytes(&self) -> usize {
        (self.output_bits / 8) as usize
    }
}

/// Derive `p = nb + 32`, `n = nb/4 + 1` and `nd = floor(nb / log2(10)) + 1`.
///
/// # Example
/// ```
/// use bbp_pi::domain::derive_parameters;
///
/// let params = derive_parameters(512);
/// assert_eq!(params.precision_bits, 544);
/// assert_eq!(params.term_count, 129);
/// assert_eq!(params.decimal_digits, 155);
/// ```
pub fn derive_parameters(output_bits: u32) -> SeriesParameters {
    SeriesParameters {
        output_bits,
        precision_bits: output_bits.saturating_add(GUARD_BITS),
        term_count: (output_bits / BITS_PER_TERM) as usize + 1,
        decimal_digits: (f64::from(output_bits) / std::f64::consts::LOG2_10) as usize + 1,
    }
}
