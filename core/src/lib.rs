//! Position-tracking and velocity-estimation core for the orbit tracker.
//!
//! The engine samples a moving object's position, reports its great-circle
//! distance to a fixed target and a smoothed ground speed, and tracks whether
//! the data source is reachable.

pub mod feed;
pub mod math;
pub mod prelude;
pub mod telemetry;
pub mod tracking;

pub use prelude::{ConnectionState, Position, StatusRecord, Target, TrackError, TrackResult};
