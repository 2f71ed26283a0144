use crate::prelude::TrackError;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

/// Counters accumulated over the life of the tracking loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub samples: usize,
    pub fetch_failures: usize,
    pub parse_failures: usize,
    pub computation_errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_sample(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.samples += 1;
        }
    }

    pub fn record_error(&self, error: &TrackError) {
        if let Ok(mut metrics) = self.inner.lock() {
            match error {
                TrackError::Fetch(_) => metrics.fetch_failures += 1,
                TrackError::Parse(_) => metrics.parse_failures += 1,
                TrackError::Computation(_) => metrics.computation_errors += 1,
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
