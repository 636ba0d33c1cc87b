// ============================================================================
// Fixed-Precision Binary Float
// Arbitrary-precision binary floating point with an explicit bit precision
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::series_value::SeriesValue;
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// Binary floating-point number with a caller-chosen precision.
///
/// Represents `mantissa × 2^exponent` where `|mantissa| < 2^precision`.
/// Every operation rounds its exact result to `precision` significant bits
/// using round-half-to-even, so the result of each operation is the
/// correctly rounded value of the exact one.
///
/// The representation is canonical: the mantissa is odd (or zero with a zero
/// exponent). Two values are equal exactly when they denote the same number at
/// the same precision.
///
/// # Example
/// ```
/// use bbp_pi::numeric::BigFloat;
///
/// let one = BigFloat::from_i64(1, 64)?;
/// let three = BigFloat::from_i64(3, 64)?;
/// let third = one.checked_div(&three)?;
/// assert_eq!(third.binary_exponent(), -1); // 0.25 <= 1/3 < 0.5
/// # Ok::<(), bbp_pi::numeric::NumericError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigFloat {
    mantissa: BigInt,
    exponent: i64,
    precision: u32,
}

impl BigFloat {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Zero at the given precision.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` if `precision` is zero.
    pub fn zero(precision: u32) -> NumericResult<Self> {
        Self::from_parts(BigInt::zero(), 0, precision)
    }

    /// Create from a machine integer, rounded to `precision` bits.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` if `precision` is zero.
    pub fn from_i64(value: i64, precision: u32) -> NumericResult<Self> {
        Self::from_parts(BigInt::from(value), 0, precision)
    }

    /// Create `mantissa × 2^exponent`, rounded to `precision` bits.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` if `precision` is zero.
    pub fn from_parts(mantissa: BigInt, exponent: i64, precision: u32) -> NumericResult<Self> {
        if precision == 0 {
            return Err(NumericError::InvalidPrecision);
        }
        Ok(Self::round(mantissa, exponent, precision))
    }

    /// Round an exact `mantissa × 2^exponent` to `precision` bits and bring it
    /// into canonical form.
    fn round(mantissa: BigInt, exponent: i64, precision: u32) -> Self {
        if mantissa.is_zero() {
            return Self {
                mantissa,
                exponent: 0,
                precision,
            };
        }

        let (sign, mut magnitude) = mantissa.into_parts();
        let mut exponent = exponent;
        let bits = magnitude.bits();

        if bits > u64::from(precision) {
            let shift = bits - u64::from(precision);
            let kept = &magnitude >> shift;
            let dropped = &magnitude - (&kept << shift);
            let half = BigUint::one() << (shift - 1);

            magnitude = match dropped.cmp(&half) {
                Ordering::Greater => kept + 1u32,
                Ordering::Equal if kept.is_odd() => kept + 1u32,
                _ => kept,
            };
            exponent += shift as i64;
        }

        // A carry out of the top bit leaves trailing zeros; strip them too.
        if let Some(zeros) = magnitude.trailing_zeros() {
            if zeros > 0 {
                magnitude >>= zeros;
                exponent += zeros as i64;
            }
        }

        Self {
            mantissa: BigInt::from_biguint(sign, magnitude),
            exponent,
            precision,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of significant bits retained after each operation.
    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Canonical (odd) integer mantissa.
    #[inline]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Exponent applied to the canonical mantissa.
    #[inline]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Exponent `e` such that `2^(e-1) <= |self| < 2^e`; zero for zero.
    ///
    /// This is the exponent of the value written as `m × 2^e` with
    /// `0.5 <= |m| < 1`.
    #[inline]
    pub fn binary_exponent(&self) -> i64 {
        if self.is_zero() {
            0
        } else {
            self.mantissa.bits() as i64 + self.exponent
        }
    }

    /// Get absolute value.
    pub fn abs(&self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            exponent: self.exponent,
            precision: self.precision,
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    fn ensure_same_precision(&self, rhs: &Self) -> NumericResult<()> {
        if self.precision == rhs.precision {
            Ok(())
        } else {
            Err(NumericError::PrecisionMismatch {
                left: self.precision,
                right: rhs.precision,
            })
        }
    }

    /// Checked addition, rounded to the shared precision.
    ///
    /// # Errors
    /// Returns `PrecisionMismatch` if the operands carry different precisions.
    pub fn checked_add(&self, rhs: &Self) -> NumericResult<Self> {
        self.ensure_same_precision(rhs)?;
        if rhs.is_zero() {
            return Ok(self.clone());
        }
        if self.is_zero() {
            return Ok(rhs.clone());
        }

        let exponent = self.exponent.min(rhs.exponent);
        let lhs = &self.mantissa << (self.exponent - exponent) as u64;
        let rhs = &rhs.mantissa << (rhs.exponent - exponent) as u64;

        Ok(Self::round(lhs + rhs, exponent, self.precision))
    }

    /// Checked subtraction, rounded to the shared precision.
    ///
    /// # Errors
    /// Returns `PrecisionMismatch` if the operands carry different precisions.
    pub fn checked_sub(&self, rhs: &Self) -> NumericResult<Self> {
        self.checked_add(&-rhs)
    }

    /// Checked multiplication, rounded to the shared precision.
    ///
    /// # Errors
    /// Returns `PrecisionMismatch` if the operands carry different precisions.
    pub fn checked_mul(&self, rhs: &Self) -> NumericResult<Self> {
        self.ensure_same_precision(rhs)?;
        Ok(Self::round(
            &self.mantissa * &rhs.mantissa,
            self.exponent + rhs.exponent,
            self.precision,
        ))
    }

    /// Checked division, rounded to the shared precision.
    ///
    /// The quotient is computed with at least two extra bits plus a sticky
    /// bit for any non-zero remainder, which is enough for correct rounding.
    ///
    /// # Errors
    /// - `PrecisionMismatch` if the operands carry different precisions
    /// - `DivisionByZero` if `rhs` is zero
    pub fn checked_div(&self, rhs: &Self) -> NumericResult<Self> {
        self.ensure_same_precision(rhs)?;
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(self.clone());
        }

        let shift = (i64::from(self.precision) + 2 + rhs.mantissa.bits() as i64
            - self.mantissa.bits() as i64)
            .max(0) as u64;

        let numerator = self.mantissa.magnitude() << shift;
        let (mut quotient, remainder) = numerator.div_rem(rhs.mantissa.magnitude());
        let mut exponent = self.exponent - shift as i64 - rhs.exponent;

        if !remainder.is_zero() {
            quotient = (quotient << 1u32) + 1u32;
            exponent -= 1;
        }

        let sign = if self.is_negative() == rhs.is_negative() {
            Sign::Plus
        } else {
            Sign::Minus
        };

        Ok(Self::round(
            BigInt::from_biguint(sign, quotient),
            exponent,
            self.precision,
        ))
    }

    /// Multiply by `2^k` exactly (no rounding involved).
    pub fn mul_pow2(&self, k: i64) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        Self {
            mantissa: self.mantissa.clone(),
            exponent: self.exponent + k,
            precision: self.precision,
        }
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Integer part, truncated toward zero.
    pub fn to_integer(&self) -> BigInt {
        if self.exponent >= 0 {
            &self.mantissa << self.exponent as u64
        } else {
            let magnitude = self.mantissa.magnitude() >> self.exponent.unsigned_abs();
            BigInt::from_biguint(self.mantissa.sign(), magnitude)
        }
    }

    /// Nearest-ish `f64`, for diagnostics only.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let dropped = self.mantissa.bits().saturating_sub(64);
        let top = (self.mantissa.magnitude() >> dropped)
            .to_u64()
            .unwrap_or(u64::MAX) as f64;
        let scale = (self.exponent + dropped as i64).clamp(i32::MIN as i64, i32::MAX as i64);
        let value = top * 2f64.powi(scale as i32);
        if self.is_negative() {
            -value
        } else {
            value
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Neg for &BigFloat {
    type Output = BigFloat;

    #[inline]
    fn neg(self) -> Self::Output {
        BigFloat {
            mantissa: -&self.mantissa,
            exponent: self.exponent,
            precision: self.precision,
        }
    }
}

impl Neg for BigFloat {
    type Output = BigFloat;

    #[inline]
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl SeriesValue for BigFloat {
    fn accumulate(&mut self, term: Self) -> NumericResult<()> {
        *self = self.checked_add(&term)?;
        Ok(())
    }

    fn binary_exponent(&self) -> i64 {
        BigFloat::binary_exponent(self)
    }

    fn scaled_magnitude(&self, shift: i64) -> BigUint {
        let total = self.exponent + shift;
        if total >= 0 {
            self.mantissa.magnitude() << total as u64
        } else {
            self.mantissa.magnitude() >> total.unsigned_abs()
        }
    }
}

impl fmt::Debug for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BigFloat<{}>({} × 2^{}, ~{:e})",
            self.precision,
            self.mantissa,
            self.exponent,
            self.to_f64()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use num_rational::BigRational;
    use proptest::prelude::*;

    fn bf(value: i64, precision: u32) -> BigFloat {
        BigFloat::from_i64(value, precision).unwrap()
    }

    fn to_rational(value: &BigFloat) -> BigRational {
        let mantissa = BigRational::from_integer(value.mantissa().clone());
        if value.exponent() >= 0 {
            mantissa * BigRational::from_integer(BigInt::one() << value.exponent() as u64)
        } else {
            mantissa / BigRational::from_integer(BigInt::one() << value.exponent().unsigned_abs())
        }
    }

    #[test]
    fn test_zero_precision_rejected() {
        assert_eq!(BigFloat::zero(0), Err(NumericError::InvalidPrecision));
        assert_eq!(BigFloat::from_i64(1, 0), Err(NumericError::InvalidPrecision));
    }

    #[test]
    fn test_canonical_form() {
        let sixteen = bf(16, 8);
        assert_eq!(sixteen.mantissa(), &BigInt::from(1));
        assert_eq!(sixteen.exponent(), 4);
        assert_eq!(sixteen.binary_exponent(), 5);

        let zero = bf(0, 8);
        assert!(zero.is_zero());
        assert_eq!(zero.exponent(), 0);
        assert_eq!(zero.binary_exponent(), 0);
    }

    #[test]
    fn test_rounding_half_to_even() {
        // 4 bits: 0b10011 (19) -> tie, kept 0b1001 is odd -> rounds up to 20
        assert_eq!(bf(19, 4), bf(20, 4));
        // 0b10101 (21) -> tie, kept 0b1010 is even -> stays at 20
        assert_eq!(bf(21, 4), bf(20, 4));
        // 0b10001 (17) -> tie, kept 0b1000 is even -> 16
        assert_eq!(bf(17, 4), bf(16, 4));
        // 0b111110 (62) -> tie on 0b11111, rounds up and carries to 64
        let carried = bf(62, 4);
        assert_eq!(carried.mantissa(), &BigInt::from(1));
        assert_eq!(carried.exponent(), 6);
        // negative values round symmetrically
        assert_eq!(bf(-19, 4), -bf(20, 4));
    }

    #[test]
    fn test_checked_add_sub() {
        let a = bf(100, 32);
        let b = bf(50, 32);
        assert_eq!(a.checked_add(&b).unwrap(), bf(150, 32));
        assert_eq!(b.checked_sub(&a).unwrap(), bf(-50, 32));
        assert!(a.checked_sub(&a).unwrap().is_zero());
    }

    #[test]
    fn test_precision_mismatch() {
        let a = bf(1, 32);
        let b = bf(1, 64);
        assert_eq!(
            a.checked_add(&b),
            Err(NumericError::PrecisionMismatch {
                left: 32,
                right: 64
            })
        );
        assert!(a.checked_mul(&b).is_err());
        assert!(a.checked_div(&b).is_err());
    }

    #[test]
    fn test_checked_mul() {
        let a = bf(12, 16);
        let b = bf(-3, 16);
        assert_eq!(a.checked_mul(&b).unwrap(), bf(-36, 16));
    }

    #[test]
    fn test_checked_div() {
        let one = bf(1, 8);
        let three = bf(3, 8);
        let third = one.checked_div(&three).unwrap();
        // 1/3 = 0.0101010101... -> 8 bits: 0.010101011 after rounding up
        assert_eq!(third.mantissa(), &BigInt::from(0b1010_1011));
        assert_eq!(third.exponent(), -9);

        let six = bf(6, 8);
        assert_eq!(six.checked_div(&three).unwrap(), bf(2, 8));
    }

    #[test]
    fn test_division_by_zero() {
        let one = bf(1, 8);
        let zero = bf(0, 8);
        assert_eq!(one.checked_div(&zero), Err(NumericError::DivisionByZero));
        assert!(zero.checked_div(&one).unwrap().is_zero());
    }

    #[test]
    fn test_mul_pow2_and_to_integer() {
        let x = bf(13, 16).mul_pow2(-2); // 3.25
        assert_eq!(x.to_integer(), BigInt::from(3));
        assert_eq!((-&x).to_integer(), BigInt::from(-3));
        assert_eq!(x.mul_pow2(4).to_integer(), BigInt::from(52));
    }

    #[test]
    fn test_to_f64() {
        let one = bf(1, 64);
        let three = bf(3, 64);
        let third = one.checked_div(&three).unwrap();
        assert!((third.to_f64() - 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(bf(-8, 4).to_f64(), -8.0);
    }

    #[test]
    fn test_scaled_magnitude_truncates() {
        let x = bf(-13, 16).mul_pow2(-2); // -3.25
        assert_eq!(x.scaled_magnitude(0), BigUint::from(3u32));
        assert_eq!(x.scaled_magnitude(2), BigUint::from(13u32));
        assert_eq!(x.scaled_magnitude(3), BigUint::from(26u32));
    }

    proptest! {
        #[test]
        fn prop_division_within_half_ulp(a in -1_000_000i64..1_000_000, b in 1i64..1_000_000) {
            let precision = 40;
            let x = bf(a, precision);
            let y = bf(b, precision);
            let quotient = x.checked_div(&y).unwrap();
            let exact = BigRational::new(BigInt::from(a), BigInt::from(b));
            let error = (to_rational(&quotient) - &exact).abs();
            if !quotient.is_zero() {
                // half an ulp at the quotient's binade
                let ulp_exp = quotient.binary_exponent() - i64::from(precision);
                let half_ulp = if ulp_exp - 1 >= 0 {
                    BigRational::from_integer(BigInt::one() << (ulp_exp - 1) as u64)
                } else {
                    BigRational::new(BigInt::one(), BigInt::one() << (1 - ulp_exp) as u64)
                };
                prop_assert!(error <= half_ulp);
            }
        }

        #[test]
        fn prop_add_mul_match_exact_when_representable(a in -65_536i64..65_536, b in -65_536i64..65_536) {
            let precision = 64;
            let x = bf(a, precision);
            let y = bf(b, precision);
            prop_assert_eq!(x.checked_add(&y).unwrap(), bf(a + b, precision));
            prop_assert_eq!(x.checked_mul(&y).unwrap(), bf(a * b, precision));
        }
    }
}
