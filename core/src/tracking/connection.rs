use crate::prelude::{ConnectionState, Position, StatusRecord, TrackError};
use std::time::{SystemTime, UNIX_EPOCH};

pub const RECONNECTING_MESSAGE: &str = "--- Reconnecting... ---";

/// Values derived from the most recent usable sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackMetrics {
    pub distance_km: f64,
    pub avg_speed_kmh: f64,
    pub current_speed_kmh: f64,
    pub position: Position,
}

impl Default for TrackMetrics {
    fn default() -> Self {
        Self {
            distance_km: 0.0,
            avg_speed_kmh: 0.0,
            current_speed_kmh: 0.0,
            position: Position::SENTINEL,
        }
    }
}

/// Connected/Reconnecting state of the sampling loop.
///
/// Transitions depend only on the outcome of the latest attempt. A failed
/// attempt re-emits the last good metrics under a degraded message.
#[derive(Debug, Clone, Default)]
pub struct ConnectionStateMachine {
    state: ConnectionState,
    last: TrackMetrics,
    consecutive_failures: u32,
}

impl ConnectionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_sample(&mut self, metrics: TrackMetrics) -> StatusRecord {
        self.state = ConnectionState::Connected;
        self.consecutive_failures = 0;
        self.last = metrics;
        let message = format!(
            "Distance to target: {:.2} km, avg speed: {:.2} km/h",
            metrics.distance_km, metrics.avg_speed_kmh
        );
        self.build_record(message)
    }

    /// The source answered but the sample could not be used; metrics are left as they were.
    pub fn on_unusable_sample(&mut self, error: &TrackError) -> StatusRecord {
        self.state = ConnectionState::Connected;
        self.consecutive_failures = 0;
        let message = format!(
            "Sample ignored ({}); distance to target: {:.2} km, avg speed: {:.2} km/h",
            error, self.last.distance_km, self.last.avg_speed_kmh
        );
        self.build_record(message)
    }

    pub fn on_failure(&mut self, error: &TrackError) -> StatusRecord {
        self.state = ConnectionState::Reconnecting;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.build_record(format!("{} ({})", RECONNECTING_MESSAGE, error))
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn last_metrics(&self) -> TrackMetrics {
        self.last
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    fn build_record(&self, message: String) -> StatusRecord {
        StatusRecord {
            distance_km: self.last.distance_km,
            avg_speed_kmh: self.last.avg_speed_kmh,
            current_speed_kmh: self.last.current_speed_kmh,
            current_position: self.last.position,
            connection_state: self.state,
            message,
            observed_at: epoch_seconds(),
        }
    }
}

fn epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or(0.0)
}
