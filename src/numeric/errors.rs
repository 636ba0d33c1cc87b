// ============================================================================
// Numeric Errors
// Error types for precision-bound arithmetic and mantissa extraction
// ============================================================================

use std::fmt;

/// Errors that can occur during high-precision arithmetic and extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Operands were rendered at different bit precisions
    PrecisionMismatch { left: u32, right: u32 },
    /// Precision must be a positive number of bits
    InvalidPrecision,
    /// Attempted division by zero
    DivisionByZero,
    /// Term index outside the prepared range
    IndexOutOfRange { index: usize, len: usize },
    /// Extracted integer does not fit the destination buffer
    CapacityExceeded {
        required_bits: u64,
        available_bits: u64,
    },
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::PrecisionMismatch { left, right } => write!(
                f,
                "precision mismatch between operands: {} bits vs {} bits",
                left, right
            ),
            NumericError::InvalidPrecision => {
                write!(f, "invalid precision: must be at least one bit")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::IndexOutOfRange { index, len } => {
                write!(f, "term index {} out of range (0..{})", index, len)
            },
            NumericError::CapacityExceeded {
                required_bits,
                available_bits,
            } => write!(
                f,
                "capacity exceeded: {} bits do not fit a {}-bit buffer",
                required_bits, available_bits
            ),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::PrecisionMismatch {
                left: 96,
                right: 64
            }
            .to_string(),
            "precision mismatch between operands: 96 bits vs 64 bits"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::CapacityExceeded {
                required_bits: 12,
                available_bits: 8
            }
            .to_string(),
            "capacity exceeded: 12 bits do not fit a 8-bit buffer"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::InvalidPrecision, NumericError::InvalidPrecision);
        assert_ne!(NumericError::InvalidPrecision, NumericError::DivisionByZero);
    }
}
