// ============================================================================
// Event Handler Interface
// Defines the contract for observing summation runs
// ============================================================================

use crate::domain::{RunId, TermStrategy};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the summation engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SummationEvent {
    /// Workers launched for every term index
    SummationStarted {
        run_id: RunId,
        strategy: TermStrategy,
        term_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// One partial result added into the accumulator
    TermAccumulated {
        run_id: RunId,
        index: usize,
        received: usize,
        timestamp: DateTime<Utc>,
    },

    /// All terms accumulated
    SummationCompleted {
        run_id: RunId,
        term_count: usize,
        elapsed: Duration,
        timestamp: DateTime<Utc>,
    },

    /// Summation aborted with reason
    SummationFailed {
        run_id: RunId,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Mantissa bytes extracted from the sum
    DigitsExtracted {
        run_id: RunId,
        output_bits: u32,
        bit_len: u64,
        timestamp: DateTime<Utc>,
    },
}

impl SummationEvent {
    pub fn run_id(&self) -> RunId {
        match self {
            SummationEvent::SummationStarted { run_id, .. }
            | SummationEvent::TermAccumulated { run_id, .. }
            | SummationEvent::SummationCompleted { run_id, .. }
            | SummationEvent::SummationFailed { run_id, .. }
            | SummationEvent::DigitsExtracted { run_id, .. } => *run_id,
        }
    }
}

/// Event handler trait for processing summation events
/// Implementations can handle logging, metrics, progress reporting, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a summation event
    fn on_event(&self, event: SummationEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<SummationEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: SummationEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: SummationEvent) {
        tracing::debug!("Summation event: {:?}", event);
    }
}

/// Keeps every event in memory
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<SummationEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<SummationEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: SummationEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(SummationEvent::SummationFailed {
            run_id: RunId::new(),
            reason: "test".to_string(),
            timestamp: Utc::now(),
        });
        // Should not panic
    }

    #[test]
    fn test_recording_handler() {
        let handler = RecordingEventHandler::new();
        let run_id = RunId::new();
        assert!(handler.is_empty());

        handler.on_events(vec![
            SummationEvent::SummationStarted {
                run_id,
                strategy: TermStrategy::Recompute,
                term_count: 3,
                timestamp: Utc::now(),
            },
            SummationEvent::TermAccumulated {
                run_id,
                index: 2,
                received: 1,
                timestamp: Utc::now(),
            },
        ]);

        assert_eq!(handler.len(), 2);
        assert!(handler.events().iter().all(|e| e.run_id() == run_id));
    }
}
