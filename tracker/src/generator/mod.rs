pub mod orbit;

pub use orbit::{OrbitConfig, SyntheticOrbitSource};
