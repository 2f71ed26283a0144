pub mod geodesic;
pub mod stats;

pub use geodesic::{distance, surface_distance};
pub use stats::RunningMean;
