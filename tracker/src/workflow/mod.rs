pub mod config;
pub mod runner;

pub use config::{ConfigOverrides, TrackerConfig};
pub use runner::Runner;
