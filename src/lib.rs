// ============================================================================
// BBP Pi Library
// Concurrent BBP-series computation of the binary digits of pi
// ============================================================================

//! # BBP Pi
//!
//! Computes the leading binary digits of pi from the Bailey-Borwein-Plouffe
//! series, evaluating every term on its own worker and reducing the partial
//! results into one high-precision accumulator.
//!
//! ## Features
//!
//! - **Explicit precision**: `BigFloat` values carry their own bit precision
//!   and round half to even on every operation
//! - **Interchangeable term strategies** (recompute, incremental, exact rational)
//! - **Fan-out/fan-in summation** over scoped threads and a bounded channel,
//!   or a tokio future set with the `async` feature
//! - **Exact extraction** of the leading mantissa bits into a big-endian buffer
//! - **Event stream** for run tracing and timing
//!
//! ## Example
//!
//! ```rust
//! use bbp_pi::prelude::*;
//! use std::sync::Arc;
//!
//! // 64 bits of pi with precomputed powers of sixteen
//! let computer = PiComputerBuilder::new(64)
//!     .incremental()
//!     .build(Arc::new(NoOpEventHandler))
//!     .unwrap();
//!
//! let digits = computer.run().unwrap();
//! assert_eq!(
//!     digits.as_bytes(),
//!     &[0xc9, 0x0f, 0xda, 0xa2, 0x21, 0x68, 0xc2, 0x34]
//! );
//! println!("{} terms in {:?}", digits.parameters.term_count, digits.elapsed);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        derive_parameters, ComputeConfig, MantissaBuffer, OverflowPolicy, PiDigits,
        ReductionOrder, RunId, SeriesParameters, TermStrategy,
    };
    pub use crate::engine::{
        compute, compute_all, create_from_config, extract, ExactTerms, IncrementalTerms,
        PiComputer, PiComputerBuilder, RecomputeTerms, SummationEngine, SummationError,
    };
    pub use crate::interfaces::{
        EventHandler, LoggingEventHandler, NoOpEventHandler, RecordingEventHandler,
        SummationEvent, TermSource,
    };
    pub use crate::numeric::{BigFloat, NumericError, PrecisionContext};
}
