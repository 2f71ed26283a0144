use crate::math::geodesic::distance;
use crate::math::stats::RunningMean;
use crate::prelude::{TrackError, TrackResult, DEFAULT_ORBITAL_ALTITUDE_KM};
use crate::tracking::history::SampleHistory;

/// Number of successful updates after which the first reading is discarded.
pub const WARMUP_UPDATES: u64 = 3;

const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedReading {
    pub instantaneous_kmh: f64,
    pub average_kmh: f64,
}

/// Derives ground speed from the two most recent fixes and keeps a running average.
///
/// The very first reading pairs the seeded sentinel with the first real fix and
/// is meaningless, so it is withdrawn from the average once, after the
/// third successful update.
#[derive(Debug, Clone)]
pub struct SpeedEstimator {
    altitude_km: f64,
    window: RunningMean,
    updates: u64,
    warmup_correction_applied: bool,
}

impl SpeedEstimator {
    pub fn new(altitude_km: f64) -> Self {
        Self {
            altitude_km,
            window: RunningMean::new(),
            updates: 0,
            warmup_correction_applied: false,
        }
    }

    pub fn update(&mut self, history: &SampleHistory) -> TrackResult<SpeedReading> {
        let (previous, current) = history.last_pair().ok_or_else(|| {
            TrackError::Computation("speed needs two samples in history".into())
        })?;

        let dt = current.timestamp - previous.timestamp;
        if dt.is_nan() || dt <= 0.0 {
            return Err(TrackError::Computation(format!(
                "non-increasing timestamps {} -> {}",
                previous.timestamp, current.timestamp
            )));
        }

        let arc = distance(
            previous.latitude,
            previous.longitude,
            current.latitude,
            current.longitude,
            self.altitude_km,
        );
        let instantaneous_kmh = arc / dt * SECONDS_PER_HOUR;

        self.window.push(instantaneous_kmh);
        self.updates += 1;
        if !self.warmup_correction_applied && self.updates >= WARMUP_UPDATES {
            self.window.remove_first();
            self.warmup_correction_applied = true;
        }

        Ok(SpeedReading {
            instantaneous_kmh,
            average_kmh: self.window.mean(),
        })
    }

    pub fn average_kmh(&self) -> f64 {
        self.window.mean()
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn warmup_correction_applied(&self) -> bool {
        self.warmup_correction_applied
    }
}

impl Default for SpeedEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_ORBITAL_ALTITUDE_KM)
    }
}
