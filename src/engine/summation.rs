// ============================================================================
// Summation Engine
// Fan-out of one worker per term, fan-in through a results channel
// ============================================================================

use super::errors::SummationError;
use crate::domain::{ReductionOrder, RunId};
use crate::interfaces::{EventHandler, SummationEvent, TermSource};
use crate::numeric::{NumericError, NumericResult, SeriesValue};
use chrono::Utc;
use crossbeam::channel;
use std::io;
use std::sync::Arc;
use std::time::Instant;

/// Parallel summation of series terms into a single accumulator.
///
/// Every term index gets its own worker. Workers share nothing but the
/// read-only term source and publish exactly one result each into a channel
/// sized for all of them, so no producer ever blocks. The calling thread is
/// the only one that touches the accumulator.
///
/// With [`ReductionOrder::Arrival`] terms are added in the order they arrive,
/// which varies between runs. Fixed-precision addition is not associative, so
/// the last guard bits of a `BigFloat` sum may differ from run to run; use
/// [`ReductionOrder::ByIndex`] when bit-reproducibility matters. Exact
/// rational sums are unaffected either way.
pub struct SummationEngine {
    reduction_order: ReductionOrder,
    event_handler: Arc<dyn EventHandler>,
}

impl SummationEngine {
    pub fn new(event_handler: Arc<dyn EventHandler>) -> Self {
        Self {
            reduction_order: ReductionOrder::Arrival,
            event_handler,
        }
    }

    pub fn with_reduction_order(mut self, order: ReductionOrder) -> Self {
        self.reduction_order = order;
        self
    }

    pub fn reduction_order(&self) -> ReductionOrder {
        self.reduction_order
    }

    pub fn event_handler(&self) -> &Arc<dyn EventHandler> {
        &self.event_handler
    }

    /// Sum terms `0..term_count` of `source` concurrently.
    pub fn sum<S: TermSource>(
        &self,
        term_count: usize,
        source: &S,
    ) -> Result<S::Value, SummationError> {
        self.sum_with_id(RunId::new(), term_count, source)
    }

    /// [`sum`](Self::sum) with a caller-chosen run identifier.
    pub fn sum_with_id<S: TermSource>(
        &self,
        run_id: RunId,
        term_count: usize,
        source: &S,
    ) -> Result<S::Value, SummationError> {
        let started = Instant::now();
        self.announce(run_id, term_count, source);

        let outcome = crossbeam::scope(|scope| {
            let (sender, receiver) = channel::bounded(term_count);

            for index in 0..term_count {
                let sender = sender.clone();
                let spawned = scope.builder().spawn(move |_| {
                    // The receiver only goes away once the run has failed.
                    let _ = sender.send((index, source.term(index)));
                });
                if let Err(err) = spawned {
                    // Workers already launched finish on their own and the
                    // scope joins them before returning.
                    return Err(spawn_failed(index, &err));
                }
            }
            drop(sender);

            let mut reducer = Reducer::new(self, run_id, term_count, source.zero());
            for (index, term) in receiver.iter() {
                reducer.receive(index, term)?;
                if reducer.received == term_count {
                    break;
                }
            }
            reducer.finish()
        });

        let result = outcome.unwrap_or(Err(SummationError::WorkerPanicked));
        self.conclude(run_id, term_count, started, result)
    }

    /// Sum terms `0..term_count` on tokio's blocking pool through a
    /// `JoinSet` future set.
    #[cfg(feature = "async")]
    pub async fn sum_async<S>(
        &self,
        term_count: usize,
        source: Arc<S>,
    ) -> Result<S::Value, SummationError>
    where
        S: TermSource + 'static,
    {
        self.sum_async_with_id(RunId::new(), term_count, source).await
    }

    /// [`sum_async`](Self::sum_async) with a caller-chosen run identifier.
    #[cfg(feature = "async")]
    pub async fn sum_async_with_id<S>(
        &self,
        run_id: RunId,
        term_count: usize,
        source: Arc<S>,
    ) -> Result<S::Value, SummationError>
    where
        S: TermSource + 'static,
    {
        let started = Instant::now();
        self.announce(run_id, term_count, source.as_ref());

        let mut tasks = tokio::task::JoinSet::new();
        for index in 0..term_count {
            let source = Arc::clone(&source);
            tasks.spawn_blocking(move || (index, source.term(index)));
        }

        let mut reducer = Reducer::new(self, run_id, term_count, source.zero());
        let result = async {
            while let Some(joined) = tasks.join_next().await {
                let (index, term) = joined.map_err(|err| SummationError::Join(err.to_string()))?;
                reducer.receive(index, term)?;
            }
            reducer.finish()
        }
        .await;

        self.conclude(run_id, term_count, started, result)
    }

    fn announce<S: TermSource + ?Sized>(&self, run_id: RunId, term_count: usize, source: &S) {
        tracing::debug!(
            run_id = %run_id.as_uuid(),
            strategy = source.name(),
            term_count,
            order = ?self.reduction_order,
            "launching term workers"
        );
        self.event_handler.on_event(SummationEvent::SummationStarted {
            run_id,
            strategy: source.strategy(),
            term_count,
            timestamp: Utc::now(),
        });
    }

    fn conclude<V>(
        &self,
        run_id: RunId,
        term_count: usize,
        started: Instant,
        result: Result<V, SummationError>,
    ) -> Result<V, SummationError> {
        match &result {
            Ok(_) => {
                let elapsed = started.elapsed();
                tracing::debug!(run_id = %run_id.as_uuid(), ?elapsed, "summation completed");
                self.event_handler.on_event(SummationEvent::SummationCompleted {
                    run_id,
                    term_count,
                    elapsed,
                    timestamp: Utc::now(),
                });
            },
            Err(err) => {
                tracing::warn!(run_id = %run_id.as_uuid(), error = %err, "summation failed");
                self.event_handler.on_event(SummationEvent::SummationFailed {
                    run_id,
                    reason: err.to_string(),
                    timestamp: Utc::now(),
                });
            },
        }
        result
    }
}

/// The OS refused to start the worker for `index`.
fn spawn_failed(index: usize, err: &io::Error) -> SummationError {
    SummationError::Spawn {
        index,
        reason: err.to_string(),
    }
}

// ============================================================================
// Reducer
// Single owner of the accumulator during the fan-in phase
// ============================================================================

struct Reducer<'a, V> {
    engine: &'a SummationEngine,
    run_id: RunId,
    expected: usize,
    received: usize,
    accumulated: usize,
    accumulator: V,
    /// Parked terms, only used for index-ordered reduction
    pending: Vec<Option<V>>,
}

impl<'a, V: SeriesValue> Reducer<'a, V> {
    fn new(engine: &'a SummationEngine, run_id: RunId, expected: usize, zero: V) -> Self {
        let pending = match engine.reduction_order {
            ReductionOrder::Arrival => Vec::new(),
            ReductionOrder::ByIndex => (0..expected).map(|_| None).collect(),
        };

        Self {
            engine,
            run_id,
            expected,
            received: 0,
            accumulated: 0,
            accumulator: zero,
            pending,
        }
    }

    fn receive(&mut self, index: usize, term: NumericResult<V>) -> Result<(), SummationError> {
        let term = term.map_err(|source| SummationError::Term { index, source })?;
        self.received += 1;

        match self.engine.reduction_order {
            ReductionOrder::Arrival => self.add(index, term),
            ReductionOrder::ByIndex => {
                let len = self.pending.len();
                let slot = self
                    .pending
                    .get_mut(index)
                    .ok_or(NumericError::IndexOutOfRange { index, len })?;
                *slot = Some(term);
                Ok(())
            },
        }
    }

    fn add(&mut self, index: usize, term: V) -> Result<(), SummationError> {
        self.accumulator.accumulate(term)?;
        self.accumulated += 1;

        tracing::trace!(index, accumulated = self.accumulated, "term accumulated");
        self.engine
            .event_handler
            .on_event(SummationEvent::TermAccumulated {
                run_id: self.run_id,
                index,
                received: self.accumulated,
                timestamp: Utc::now(),
            });
        Ok(())
    }

    fn finish(mut self) -> Result<V, SummationError> {
        if self.received < self.expected {
            return Err(SummationError::WorkerLost {
                received: self.received,
                expected: self.expected,
            });
        }

        let pending = std::mem::take(&mut self.pending);
        for (index, term) in pending.into_iter().enumerate() {
            if let Some(term) = term {
                self.add(index, term)?;
            }
        }

        Ok(self.accumulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TermStrategy;
    use crate::interfaces::{NoOpEventHandler, RecordingEventHandler};
    use crate::numeric::{rational, BigRational};

    /// Term `i` is `i`, so the sum of `0..n` is `n(n-1)/2`.
    struct Identity;

    impl TermSource for Identity {
        type Value = BigRational;

        fn term(&self, index: usize) -> NumericResult<BigRational> {
            Ok(rational(index as i64))
        }

        fn zero(&self) -> BigRational {
            rational(0)
        }

        fn strategy(&self) -> TermStrategy {
            TermStrategy::ExactRational
        }
    }

    /// Fails on one index.
    struct Faulty(usize);

    impl TermSource for Faulty {
        type Value = BigRational;

        fn term(&self, index: usize) -> NumericResult<BigRational> {
            if index == self.0 {
                Err(NumericError::DivisionByZero)
            } else {
                Ok(rational(1))
            }
        }

        fn zero(&self) -> BigRational {
            rational(0)
        }

        fn strategy(&self) -> TermStrategy {
            TermStrategy::ExactRational
        }
    }

    /// Panics on one index.
    struct Panicking(usize);

    impl TermSource for Panicking {
        type Value = BigRational;

        fn term(&self, index: usize) -> NumericResult<BigRational> {
            if index == self.0 {
                panic!("worker {} cannot proceed", index);
            }
            Ok(rational(1))
        }

        fn zero(&self) -> BigRational {
            rational(0)
        }

        fn strategy(&self) -> TermStrategy {
            TermStrategy::ExactRational
        }
    }

    #[test]
    fn test_sum_all_terms() {
        let engine = SummationEngine::new(Arc::new(NoOpEventHandler));
        assert_eq!(engine.sum(100, &Identity).unwrap(), rational(4950));
    }

    #[test]
    fn test_sum_by_index() {
        let engine = SummationEngine::new(Arc::new(NoOpEventHandler))
            .with_reduction_order(ReductionOrder::ByIndex);
        assert_eq!(engine.reduction_order(), ReductionOrder::ByIndex);
        assert_eq!(engine.sum(10, &Identity).unwrap(), rational(45));
    }

    #[test]
    fn test_sum_zero_terms() {
        let engine = SummationEngine::new(Arc::new(NoOpEventHandler));
        assert_eq!(engine.sum(0, &Identity).unwrap(), rational(0));
    }

    #[test]
    fn test_events_emitted() {
        let handler = Arc::new(RecordingEventHandler::new());
        let engine = SummationEngine::new(handler.clone());
        let run_id = RunId::new();
        engine.sum_with_id(run_id, 5, &Identity).unwrap();

        let events = handler.events();
        assert_eq!(events.len(), 7);
        assert!(matches!(
            events.first(),
            Some(SummationEvent::SummationStarted { term_count: 5, .. })
        ));
        assert!(matches!(
            events.last(),
            Some(SummationEvent::SummationCompleted { term_count: 5, .. })
        ));
        assert!(events.iter().all(|e| e.run_id() == run_id));

        let mut indices: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                SummationEvent::TermAccumulated { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_term_failure_reported() {
        let handler = Arc::new(RecordingEventHandler::new());
        let engine = SummationEngine::new(handler.clone());
        let result = engine.sum(8, &Faulty(3));

        assert_eq!(
            result,
            Err(SummationError::Term {
                index: 3,
                source: NumericError::DivisionByZero
            })
        );
        assert!(handler
            .events()
            .iter()
            .any(|e| matches!(e, SummationEvent::SummationFailed { .. })));
    }

    #[test]
    fn test_spawn_failure_maps_to_error() {
        let err = io::Error::new(io::ErrorKind::WouldBlock, "Resource temporarily unavailable");
        let mapped = spawn_failed(41, &err);

        assert_eq!(
            mapped,
            SummationError::Spawn {
                index: 41,
                reason: "Resource temporarily unavailable".to_string()
            }
        );
        assert!(mapped.to_string().contains("worker 41"));
    }

    #[test]
    fn test_spawn_failure_reported_as_failed_run() {
        let handler = Arc::new(RecordingEventHandler::new());
        let engine = SummationEngine::new(handler.clone());
        let run_id = RunId::new();
        let err = io::Error::new(io::ErrorKind::WouldBlock, "no threads left");

        let result: Result<BigRational, _> =
            engine.conclude(run_id, 8, Instant::now(), Err(spawn_failed(3, &err)));

        assert!(matches!(result, Err(SummationError::Spawn { index: 3, .. })));
        assert!(matches!(
            handler.events().last(),
            Some(SummationEvent::SummationFailed { reason, .. }) if reason.contains("no threads left")
        ));
    }

    #[test]
    fn test_worker_panic_does_not_hang() {
        let engine = SummationEngine::new(Arc::new(NoOpEventHandler));
        let result = engine.sum(6, &Panicking(2));
        assert_eq!(result, Err(SummationError::WorkerPanicked));
    }
}
