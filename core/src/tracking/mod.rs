pub mod connection;
pub mod engine;
pub mod history;
pub mod poller;
pub mod speed;

pub use connection::{ConnectionStateMachine, TrackMetrics, RECONNECTING_MESSAGE};
pub use engine::{EngineConfig, TrackingEngine};
pub use history::SampleHistory;
pub use poller::{PollLoop, SampleSource, StatusSink};
pub use speed::{SpeedEstimator, SpeedReading};
