// ============================================================================
// Mantissa Buffer
// Fixed-width big-endian bytes holding the leading bits of a value
// ============================================================================

use super::config::OverflowPolicy;
use crate::numeric::{NumericError, NumericResult};
use num_bigint::BigUint;
use smallvec::{smallvec, SmallVec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Up to 512 output bits stay inline.
const INLINE_BYTES: usize = 64;

/// Unsigned big-endian integer in exactly `len()` bytes.
///
/// The length is fixed at construction and never depends on the magnitude of
/// the stored integer: narrow values are left-padded with zero bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MantissaBuffer {
    bytes: SmallVec<[u8; INLINE_BYTES]>,
}

impl MantissaBuffer {
    /// All-zero buffer of `n_bytes` bytes.
    pub fn zeroed(n_bytes: usize) -> Self {
        Self {
            bytes: smallvec![0u8; n_bytes],
        }
    }

    /// Serialize `value` into exactly `n_bytes` bytes.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if `value` needs more than `8 * n_bytes`
    /// bits and the policy is `Reject`. With `TruncateHigh` the low-order
    /// `n_bytes` bytes are kept.
    pub fn from_integer(
        value: &BigUint,
        n_bytes: usize,
        policy: OverflowPolicy,
    ) -> NumericResult<Self> {
        let required_bits = value.bits();
        let available_bits = n_bytes as u64 * 8;

        if required_bits > available_bits {
            match policy {
                OverflowPolicy::Reject => {
                    return Err(NumericError::CapacityExceeded {
                        required_bits,
                        available_bits,
                    });
                },
                OverflowPolicy::TruncateHigh => {
                    tracing::warn!(
                        required_bits,
                        available_bits,
                        "mantissa wider than buffer, dropping high-order bits"
                    );
                },
            }
        }

        let encoded = value.to_bytes_be();
        let source = &encoded[encoded.len().saturating_sub(n_bytes)..];

        let mut buffer = Self::zeroed(n_bytes);
        buffer.bytes[n_bytes - source.len()..].copy_from_slice(source);
        Ok(buffer)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Buffer capacity in bits.
    #[inline]
    pub fn capacity_bits(&self) -> u64 {
        self.bytes.len() as u64 * 8
    }

    /// The stored integer.
    pub fn to_integer(&self) -> BigUint {
        BigUint::from_bytes_be(&self.bytes)
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.into_vec()
    }
}

impl AsRef<[u8]> for MantissaBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
