//! WireGuard Endpoint Pinger
//!
//! Scans a directory of WireGuard configuration files, extracts the
//! `Endpoint` host of every `[Peer]`, pings each unique host with bounded
//! concurrency and reports the results sorted by average latency.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, Endpoint, PingStats, ProbeFailure, ProbeResult};
pub use executor::ProbeScheduler;
pub use probe::{Prober, SystemPinger};
pub use report::Report;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_PING_COUNT: u32 = 3;
    pub const DEFAULT_CONCURRENCY: usize = 20;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const MAX_PING_COUNT: u32 = 100;
    pub const MAX_CONCURRENCY: usize = 1024;
    pub const MAX_TIMEOUT_SECS: u64 = 300;
}
