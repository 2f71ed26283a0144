pub mod http;

pub use http::HttpSampleSource;
