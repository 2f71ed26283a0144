use orbitcore::prelude::{ConnectionState, StatusRecord};
use serde::{Deserialize, Serialize};

/// What the status endpoint serves: the latest record plus publication counters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatusModel {
    pub latest: Option<StatusRecord>,
    pub records_published: usize,
    pub reconnecting_records: usize,
}

impl StatusModel {
    pub fn apply(&mut self, record: &StatusRecord) {
        self.records_published += 1;
        if record.connection_state == ConnectionState::Reconnecting {
            self.reconnecting_records += 1;
        }
        self.latest = Some(record.clone());
    }

    /// Two display lines in the style of a map footer and header.
    pub fn display_lines(&self) -> Option<(String, String)> {
        let record = self.latest.as_ref()?;
        let header = match record.connection_state {
            ConnectionState::Connected => format!(
                "Current location: [Latitude: {:.4}, Longitude: {:.4}]",
                record.current_position.latitude, record.current_position.longitude
            ),
            ConnectionState::Reconnecting => record.message.clone(),
        };
        let footer = format!(
            "Distance to target: {:.2} km, avg speed: {:.2} km/h",
            record.distance_km, record.avg_speed_kmh
        );
        Some((header, footer))
    }
}
