use crate::prelude::{Position, StatusRecord, TrackResult};
use crate::tracking::engine::TrackingEngine;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Where position samples come from.
pub trait SampleSource {
    /// Requests one sample. Transport problems are `TrackError::Fetch`,
    /// unusable bodies are `TrackError::Parse`.
    fn fetch(&mut self) -> impl Future<Output = TrackResult<Position>>;
}

/// Receiver of the per-iteration status. Must not block the loop.
pub trait StatusSink {
    fn publish(&self, record: &StatusRecord);
}

impl<F> StatusSink for F
where
    F: Fn(&StatusRecord),
{
    fn publish(&self, record: &StatusRecord) {
        self(record)
    }
}

/// Sequential fetch -> observe -> publish -> wait loop.
pub struct PollLoop<S, K> {
    engine: TrackingEngine,
    source: S,
    sink: K,
    interval: Duration,
    max_iterations: Option<usize>,
}

impl<S: SampleSource, K: StatusSink> PollLoop<S, K> {
    pub fn new(engine: TrackingEngine, source: S, sink: K, interval: Duration) -> Self {
        Self {
            engine,
            source,
            sink,
            interval,
            max_iterations: None,
        }
    }

    /// Stops after `limit` iterations instead of running until cancelled.
    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    /// Runs until `cancel` fires (or the iteration limit is hit) and returns
    /// the number of completed iterations.
    pub async fn run(&mut self, cancel: &CancellationToken) -> usize {
        let mut iterations = 0;
        loop {
            if cancel.is_cancelled() || self.limit_reached(iterations) {
                break;
            }

            let outcome = tokio::select! {
                outcome = self.source.fetch() => outcome,
                _ = cancel.cancelled() => break,
            };
            let record = self.engine.observe(outcome);
            self.sink.publish(&record);
            iterations += 1;

            if self.limit_reached(iterations) {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = cancel.cancelled() => break,
            }
        }
        iterations
    }

    pub fn engine(&self) -> &TrackingEngine {
        &self.engine
    }

    fn limit_reached(&self, iterations: usize) -> bool {
        self.max_iterations.is_some_and(|limit| iterations >= limit)
    }
}
