use crate::generator::{OrbitConfig, SyntheticOrbitSource};
use crate::source::HttpSampleSource;
use crate::workflow::config::TrackerConfig;
use orbitcore::telemetry::MetricsSnapshot;
use orbitcore::tracking::{PollLoop, SampleSource, StatusSink, TrackingEngine};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct RunSummary {
    pub iterations: usize,
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: TrackerConfig,
}

impl Runner {
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Polls the configured endpoint until cancelled.
    pub async fn run_live<K: StatusSink>(
        &self,
        sink: K,
        cancel: &CancellationToken,
    ) -> anyhow::Result<RunSummary> {
        let source = HttpSampleSource::new(&self.config)?;
        Ok(self
            .drive(source, sink, self.config.poll_interval(), None, cancel)
            .await)
    }

    /// Runs a bounded number of iterations against the synthetic orbit.
    pub async fn run_offline<K: StatusSink>(
        &self,
        orbit: OrbitConfig,
        iterations: usize,
        sink: K,
        cancel: &CancellationToken,
    ) -> RunSummary {
        let source = SyntheticOrbitSource::new(orbit);
        self.drive(source, sink, Duration::ZERO, Some(iterations), cancel)
            .await
    }

    async fn drive<S: SampleSource, K: StatusSink>(
        &self,
        source: S,
        sink: K,
        interval: Duration,
        limit: Option<usize>,
        cancel: &CancellationToken,
    ) -> RunSummary {
        let engine = TrackingEngine::new(&self.config.to_engine_config());
        let mut poll = PollLoop::new(engine, source, sink, interval);
        if let Some(limit) = limit {
            poll = poll.with_max_iterations(limit);
        }
        let iterations = poll.run(cancel).await;
        RunSummary {
            iterations,
            metrics: poll.engine().metrics(),
        }
    }
}
