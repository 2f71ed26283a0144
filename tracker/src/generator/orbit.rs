use orbitcore::prelude::{Position, TrackError, TrackResult};
use orbitcore::tracking::SampleSource;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::future::Future;

/// Sidereal rotation rate of the Earth in degrees per second.
const EARTH_ROTATION_DEG_PER_SEC: f64 = 360.0 / 86_164.0;

/// Parameters of the synthetic circular orbit used for offline runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub inclination_deg: f64,
    pub period_secs: f64,
    pub step_secs: f64,
    pub start_longitude_deg: f64,
    pub start_timestamp: f64,
    pub jitter_deg: f64,
    /// Probability in `[0, 1]` that a fetch fails.
    pub failure_rate: f64,
    pub seed: u64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            inclination_deg: 51.6,
            period_secs: 5560.0,
            step_secs: 60.0,
            start_longitude_deg: 80.0,
            start_timestamp: 1_700_000_000.0,
            jitter_deg: 0.01,
            failure_rate: 0.0,
            seed: 0,
        }
    }
}

/// Deterministic ground-track generator standing in for the live feed.
pub struct SyntheticOrbitSource {
    config: OrbitConfig,
    rng: StdRng,
    elapsed_secs: f64,
}

impl SyntheticOrbitSource {
    pub fn new(config: OrbitConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            elapsed_secs: 0.0,
        }
    }

    fn ground_track(&self, elapsed_secs: f64) -> (f64, f64) {
        let inclination = self.config.inclination_deg.to_radians();
        let argument = 2.0 * PI * elapsed_secs / self.config.period_secs.max(1.0);

        let latitude = (inclination.sin() * argument.sin()).asin().to_degrees();
        let longitude = (inclination.cos() * argument.sin())
            .atan2(argument.cos())
            .to_degrees()
            - EARTH_ROTATION_DEG_PER_SEC * elapsed_secs
            + self.config.start_longitude_deg;

        (latitude, wrap_longitude(longitude))
    }

    fn jitter(&mut self) -> f64 {
        if self.config.jitter_deg > 0.0 {
            self.rng
                .gen_range(-self.config.jitter_deg..self.config.jitter_deg)
        } else {
            0.0
        }
    }

    fn next_sample(&mut self) -> TrackResult<Position> {
        let elapsed = self.elapsed_secs;
        self.elapsed_secs += self.config.step_secs.max(1.0);

        if self.config.failure_rate > 0.0 && self.rng.gen_bool(self.config.failure_rate.min(1.0)) {
            return Err(TrackError::Fetch("simulated link drop".into()));
        }

        let (latitude, longitude) = self.ground_track(elapsed);
        let latitude = (latitude + self.jitter()).clamp(-90.0, 90.0);
        let longitude = wrap_longitude(longitude + self.jitter());
        Ok(Position::new(
            latitude,
            longitude,
            self.config.start_timestamp + elapsed,
        ))
    }
}

impl SampleSource for SyntheticOrbitSource {
    fn fetch(&mut self) -> impl Future<Output = TrackResult<Position>> {
        std::future::ready(self.next_sample())
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}
