pub mod payload;

pub use payload::{Coordinate, FeedPayload, FeedPosition};
