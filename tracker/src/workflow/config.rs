use anyhow::Context;
use orbitcore::prelude::{Target, DEFAULT_ORBITAL_ALTITUDE_KM};
use orbitcore::tracking::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://api.open-notify.org/iss-now.json";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub target: Target,
    pub orbital_altitude_km: f64,
    pub history_capacity: usize,
    pub bind: SocketAddr,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            poll_interval_secs: 1,
            target: Target::new(16.4328, 80.7697),
            orbital_altitude_km: DEFAULT_ORBITAL_ALTITUDE_KM,
            history_capacity: 2,
            bind: SocketAddr::from(([127, 0, 0, 1], 9000)),
        }
    }
}

/// Command-line values that take precedence over the file or defaults.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub target_latitude: Option<f64>,
    pub target_longitude: Option<f64>,
    pub poll_interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl TrackerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading tracker config {}", path_ref.display()))?;
        let config: TrackerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing tracker config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(endpoint) = &overrides.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(latitude) = overrides.target_latitude {
            self.target.latitude = latitude;
        }
        if let Some(longitude) = overrides.target_longitude {
            self.target.longitude = longitude;
        }
        if let Some(interval) = overrides.poll_interval_secs {
            self.poll_interval_secs = interval;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            target: self.target,
            orbital_altitude_km: self.orbital_altitude_km,
            history_capacity: self.history_capacity,
        }
    }
}
