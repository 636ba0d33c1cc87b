// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod event_handler;
mod term_source;

pub use event_handler::{
    EventHandler, LoggingEventHandler, NoOpEventHandler, RecordingEventHandler, SummationEvent,
};
pub use term_source::TermSource;
