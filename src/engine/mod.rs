// ============================================================================
// Engine Module
// Term strategies, concurrent summation and digit extraction
// ============================================================================

mod errors;
mod exact;
mod extract;
mod incremental;
mod kernel;
mod pi_computer;
mod recompute;
mod summation;

pub mod factory;

pub use errors::SummationError;
pub use exact::ExactTerms;
pub use extract::{extract, extract_with, Extraction};
pub use factory::{compute, compute_all, create_from_config, PiComputerBuilder};
pub use incremental::IncrementalTerms;
pub use pi_computer::PiComputer;
pub use recompute::RecomputeTerms;
pub use summation::SummationEngine;
