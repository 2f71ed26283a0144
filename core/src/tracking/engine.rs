use crate::math::geodesic::surface_distance;
use crate::prelude::{
    ConnectionState, Position, StatusRecord, Target, TrackResult, DEFAULT_ORBITAL_ALTITUDE_KM,
};
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use crate::tracking::connection::{ConnectionStateMachine, TrackMetrics};
use crate::tracking::history::{SampleHistory, MIN_CAPACITY};
use crate::tracking::speed::SpeedEstimator;
use serde::{Deserialize, Serialize};

/// Settings fixed for the lifetime of an engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub target: Target,
    pub orbital_altitude_km: f64,
    pub history_capacity: usize,
}

impl EngineConfig {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            orbital_altitude_km: DEFAULT_ORBITAL_ALTITUDE_KM,
            history_capacity: MIN_CAPACITY,
        }
    }
}

/// Owns all mutable tracking state; fed one sampling outcome per loop iteration.
pub struct TrackingEngine {
    target: Target,
    history: SampleHistory,
    speed: SpeedEstimator,
    connection: ConnectionStateMachine,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl TrackingEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            target: config.target,
            history: SampleHistory::with_capacity(config.history_capacity),
            speed: SpeedEstimator::new(config.orbital_altitude_km),
            connection: ConnectionStateMachine::new(),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
        }
    }

    pub fn observe(&mut self, outcome: TrackResult<Position>) -> StatusRecord {
        match outcome {
            Ok(position) => self.ingest(position),
            Err(error) => {
                self.metrics.record_error(&error);
                self.logger.warn(&format!("Request error: {}", error));
                self.connection.on_failure(&error)
            }
        }
    }

    fn ingest(&mut self, position: Position) -> StatusRecord {
        self.logger.record(&format!(
            "New position: latitude {}, longitude {}",
            position.latitude, position.longitude
        ));
        self.history.record(position);

        match self.speed.update(&self.history) {
            Ok(reading) => {
                let distance_km = surface_distance(
                    position.latitude,
                    position.longitude,
                    self.target.latitude,
                    self.target.longitude,
                );
                self.metrics.record_sample();
                self.logger.record(&format!(
                    "Distance to target {:.4} km, avg speed {:.2} km/h",
                    distance_km, reading.average_kmh
                ));
                self.connection.on_sample(TrackMetrics {
                    distance_km,
                    avg_speed_kmh: reading.average_kmh,
                    current_speed_kmh: reading.instantaneous_kmh,
                    position,
                })
            }
            Err(error) => {
                self.history.discard_latest();
                self.metrics.record_error(&error);
                self.logger.warn(&format!("Skipping sample: {}", error));
                self.connection.on_unusable_sample(&error)
            }
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn speed(&self) -> &SpeedEstimator {
        &self.speed
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedPayload;
    use crate::math::geodesic::distance;
    use crate::prelude::TrackError;

    fn engine() -> TrackingEngine {
        TrackingEngine::new(&EngineConfig::new(Target::new(16.4328, 80.7697)))
    }

    #[test]
    fn reference_scenario_reports_distance_and_speed() {
        let mut engine = engine();
        engine.observe(Ok(Position::new(16.0, 80.0, 1000.0)));
        let record = engine.observe(Ok(Position::new(16.1, 80.1, 1060.0)));

        assert_eq!(record.connection_state, ConnectionState::Connected);
        assert!((record.distance_km - 80.5).abs() < 0.1);
        let expected_speed = distance(16.0, 80.0, 16.1, 80.1, 410.0) / 60.0 * 3600.0;
        assert!((record.current_speed_kmh - expected_speed).abs() < 1e-9);
        assert_eq!(record.current_position, Position::new(16.1, 80.1, 1060.0));
    }

    #[test]
    fn failures_then_success_sequence() {
        let mut engine = engine();
        let outcomes = vec![
            Err(TrackError::Fetch("connection refused".into())),
            Err(TrackError::Fetch("timed out".into())),
            Err(TrackError::Parse("missing iss_position".into())),
            Ok(Position::new(16.0, 80.0, 1000.0)),
        ];
        let states: Vec<_> = outcomes
            .into_iter()
            .map(|outcome| engine.observe(outcome))
            .collect();

        let sequence: Vec<_> = states.iter().map(|r| r.connection_state).collect();
        assert_eq!(
            sequence,
            vec![
                ConnectionState::Reconnecting,
                ConnectionState::Reconnecting,
                ConnectionState::Reconnecting,
                ConnectionState::Connected,
            ]
        );
        let last = states.last().unwrap();
        let expected = surface_distance(16.0, 80.0, 16.4328, 80.7697);
        assert!((last.distance_km - expected).abs() < 1e-9);
        assert_eq!(engine.metrics().fetch_failures, 2);
        assert_eq!(engine.metrics().parse_failures, 1);
        assert_eq!(engine.metrics().samples, 1);
    }

    #[test]
    fn failed_fetch_preserves_reported_values() {
        let mut engine = engine();
        engine.observe(Ok(Position::new(16.0, 80.0, 1000.0)));
        let good = engine.observe(Ok(Position::new(16.1, 80.1, 1060.0)));
        let degraded = engine.observe(Err(TrackError::Fetch("dns".into())));

        assert_eq!(degraded.connection_state, ConnectionState::Reconnecting);
        assert_eq!(degraded.distance_km, good.distance_km);
        assert_eq!(degraded.avg_speed_kmh, good.avg_speed_kmh);
        assert_eq!(degraded.current_position, good.current_position);
        assert_ne!(degraded.message, good.message);
    }

    #[test]
    fn duplicate_timestamp_is_skipped_without_corrupting_state() {
        let mut engine = engine();
        engine.observe(Ok(Position::new(16.0, 80.0, 1000.0)));
        let good = engine.observe(Ok(Position::new(16.1, 80.1, 1060.0)));
        let skipped = engine.observe(Ok(Position::new(16.2, 80.2, 1060.0)));

        assert_eq!(skipped.connection_state, ConnectionState::Connected);
        assert_eq!(skipped.avg_speed_kmh, good.avg_speed_kmh);
        assert_eq!(skipped.distance_km, good.distance_km);
        assert_eq!(engine.speed().window_len(), 2);
        assert_eq!(engine.history().latest().timestamp, 1060.0);
        assert_eq!(engine.metrics().computation_errors, 1);

        let next = engine.observe(Ok(Position::new(16.2, 80.2, 1120.0)));
        let expected = distance(16.1, 80.1, 16.2, 80.2, 410.0) / 60.0 * 3600.0;
        assert!((next.current_speed_kmh - expected).abs() < 1e-9);
        assert_eq!(engine.speed().window_len(), 2);
    }

    #[test]
    fn non_finite_response_does_not_poison_average() {
        let mut engine = engine();
        engine.observe(Ok(Position::new(16.0, 80.0, 1000.0)));
        let good = engine.observe(Ok(Position::new(16.1, 80.1, 1060.0)));

        let body = br#"{"timestamp": 1120, "iss_position": {"latitude": "NaN", "longitude": "80.2"}}"#;
        let degraded = engine.observe(FeedPayload::from_slice(body));
        assert_eq!(degraded.connection_state, ConnectionState::Reconnecting);
        assert_eq!(degraded.avg_speed_kmh, good.avg_speed_kmh);
        assert_eq!(engine.metrics().parse_failures, 1);

        let mut record = degraded;
        for step in 1..=5 {
            let t = 1120.0 + step as f64 * 60.0;
            record = engine.observe(Ok(Position::new(16.1 + step as f64 * 0.1, 80.2, t)));
        }
        assert_eq!(record.connection_state, ConnectionState::Connected);
        assert!(record.avg_speed_kmh.is_finite());
        assert!(record.distance_km.is_finite());
    }

    #[test]
    fn failure_before_first_sample_reports_empty_metrics() {
        let mut engine = engine();
        let record = engine.observe(Err(TrackError::Fetch("offline".into())));
        assert_eq!(record.distance_km, 0.0);
        assert_eq!(record.avg_speed_kmh, 0.0);
        assert_eq!(record.current_position, Position::SENTINEL);
    }
}
