// ============================================================================
// Summation Errors
// Failures of a concurrent summation run
// ============================================================================

use crate::numeric::NumericError;
use std::fmt;

/// Errors that can abort a summation or a full pi computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummationError {
    /// Configuration rejected by validation
    InvalidConfig(String),
    /// A worker could not compute its term
    Term { index: usize, source: NumericError },
    /// Fewer results arrived than workers were launched
    WorkerLost { received: usize, expected: usize },
    /// A worker thread panicked
    WorkerPanicked,
    /// The OS refused to start a worker thread
    Spawn { index: usize, reason: String },
    /// A task of the async future set failed to join
    Join(String),
    /// Accumulation or extraction failed
    Numeric(NumericError),
}

impl fmt::Display for SummationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummationError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            SummationError::Term { index, source } => {
                write!(f, "term {} could not be computed: {}", index, source)
            },
            SummationError::WorkerLost { received, expected } => write!(
                f,
                "worker lost: received {} of {} partial results",
                received, expected
            ),
            SummationError::WorkerPanicked => write!(f, "a term worker panicked"),
            SummationError::Spawn { index, reason } => {
                write!(f, "could not start worker {}: {}", index, reason)
            },
            SummationError::Join(reason) => write!(f, "term task failed to join: {}", reason),
            SummationError::Numeric(err) => write!(f, "numeric error: {}", err),
        }
    }
}

impl std::error::Error for SummationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SummationError::Term { source, .. } => Some(source),
            SummationError::Numeric(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for SummationError {
    fn from(err: NumericError) -> Self {
        SummationError::Numeric(err)
    }
}
