// ============================================================================
// Numeric Module
// Explicit-precision arithmetic for the BBP series
// ============================================================================
//
// This module provides:
// - BigFloat: binary floating point with a per-value bit precision
// - PrecisionContext: the shared precision plus pre-rendered constants
// - SeriesValue: accumulate/extract contract for BigFloat and BigRational
// - NumericError: Error types for arithmetic and extraction
//
// Design principles:
// - No hidden global precision: every value carries its own
// - All arithmetic returns Result (no panics)
// - Each operation is correctly rounded (round half to even)
// - Exact rationals share the same contract and never round

mod big_float;
mod errors;
mod precision;
mod rational;
mod series_value;

pub use big_float::BigFloat;
pub use errors::{NumericError, NumericResult};
pub use precision::PrecisionContext;
pub use rational::rational;
pub use series_value::SeriesValue;

pub use num_rational::BigRational;
