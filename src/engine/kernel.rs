// ============================================================================
// BBP Kernel
// The four-quotient numerator shared by every term strategy
// ============================================================================

use crate::numeric::{rational, BigFloat, BigRational, NumericResult, PrecisionContext};
use num_bigint::BigInt;

/// `4/(8i+1) - 2/(8i+4) - 1/(8i+5) - 1/(8i+6)` at the context's precision.
///
/// Operations are applied in a fixed order so that every strategy sharing
/// this kernel rounds identically.
pub(crate) fn numerator(ctx: &PrecisionContext, index: usize) -> NumericResult<BigFloat> {
    let eight_i = ctx.eight.checked_mul(&ctx.index(index)?)?;

    let t1 = ctx.four.checked_div(&eight_i.checked_add(&ctx.one)?)?;
    let t2 = ctx.two.checked_div(&eight_i.checked_add(&ctx.four)?)?;
    let t3 = ctx.one.checked_div(&eight_i.checked_add(&ctx.five)?)?;
    let t4 = ctx.one.checked_div(&eight_i.checked_add(&ctx.six)?)?;

    t1.checked_sub(&t2)?.checked_sub(&t3)?.checked_sub(&t4)
}

/// Exact counterpart of [`numerator`].
pub(crate) fn numerator_exact(index: usize) -> BigRational {
    let eight_i = BigRational::from_integer(BigInt::from(8) * BigInt::from(index));

    let t1 = rational(4) / (&eight_i + rational(1));
    let t2 = rational(2) / (&eight_i + rational(4));
    let t3 = rational(1) / (&eight_i + rational(5));
    let t4 = rational(1) / (&eight_i + rational(6));

    t1 - t2 - t3 - t4
}
