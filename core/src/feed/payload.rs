use crate::prelude::{Position, TrackError, TrackResult};
use serde::{Deserialize, Serialize};

/// A coordinate as transmitted by the feed: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn to_degrees(&self, field: &str) -> TrackResult<f64> {
        let value = match self {
            Coordinate::Number(value) => *value,
            Coordinate::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                TrackError::Parse(format!("{} is not numeric: {:?}", field, text))
            })?,
        };
        finite(field, value)
    }
}

fn finite(field: &str, value: f64) -> TrackResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TrackError::Parse(format!("{} is not finite: {}", field, value)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPosition {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

/// Body of the position endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPayload {
    pub iss_position: FeedPosition,
    pub timestamp: f64,
}

impl FeedPayload {
    pub fn from_slice(bytes: &[u8]) -> TrackResult<Position> {
        let payload: FeedPayload = serde_json::from_slice(bytes)
            .map_err(|err| TrackError::Parse(format!("decoding position payload: {}", err)))?;
        payload.to_position()
    }

    pub fn to_position(&self) -> TrackResult<Position> {
        Ok(Position::new(
            self.iss_position.latitude.to_degrees("latitude")?,
            self.iss_position.longitude.to_degrees("longitude")?,
            finite("timestamp", self.timestamp)?,
        ))
    }
}
