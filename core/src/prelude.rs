use serde::{Deserialize, Serialize};

/// Mean Earth radius used by every geodesic computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed orbital altitude of the tracked object, used for ground-track arc length.
pub const DEFAULT_ORBITAL_ALTITUDE_KM: f64 = 410.0;

/// A single received fix. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Epoch seconds reported by the data source.
    pub timestamp: f64,
}

impl Position {
    /// Origin fix at t=0 seeded into every history so "previous sample" is always defined.
    pub const SENTINEL: Position = Position {
        latitude: 0.0,
        longitude: 0.0,
        timestamp: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64, timestamp: f64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }
}

/// Fixed reference point that distances are reported against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub latitude: f64,
    pub longitude: f64,
}

impl Target {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectionState {
    #[default]
    Connected,
    Reconnecting,
}

/// Output state handed to the presentation layer once per loop iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub distance_km: f64,
    pub avg_speed_kmh: f64,
    pub current_speed_kmh: f64,
    pub current_position: Position,
    pub connection_state: ConnectionState,
    pub message: String,
    /// Wall-clock epoch seconds at which the record was built.
    pub observed_at: f64,
}

/// Error kinds produced while sampling and deriving metrics.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("malformed sample: {0}")]
    Parse(String),
    #[error("computation error: {0}")]
    Computation(String),
}

pub type TrackResult<T> = Result<T, TrackError>;
