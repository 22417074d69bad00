//! Data models and structures for the endpoint pinger

pub mod config;
pub mod endpoint;
pub mod probe;

// Re-export main model types
pub use config::Config;
pub use endpoint::Endpoint;
pub use probe::{PingStats, ProbeFailure, ProbeResult};
