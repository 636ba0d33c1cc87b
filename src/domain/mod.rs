// ============================================================================
// Domain Models Module
// Contains configuration, parameters and result value objects
// ============================================================================

pub mod config;
pub mod mantissa;
pub mod parameters;
pub mod run;
pub mod term;

pub use config::{ComputeConfig, OverflowPolicy, ReductionOrder, TermStrategy};
pub use mantissa::MantissaBuffer;
pub use parameters::{derive_parameters, SeriesParameters, BITS_PER_TERM, GUARD_BITS};
pub use run::{PiDigits, RunId};
pub use term::TermState;
