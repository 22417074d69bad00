//! Latency probing
//!
//! The scheduler only sees the [`Prober`] trait, so the system `ping`
//! implementation can be replaced by a native ICMP one without touching it.

pub mod parser;
pub mod system;

pub use parser::parse_ping_output;
pub use system::{PingPlatform, SystemPinger};

use crate::{
    models::{PingStats, ProbeFailure},
    types::IpFamily,
};
use async_trait::async_trait;
use std::time::Duration;

/// Result of a single probe: statistics, or the reason the host counts as unreachable
pub type ProbeOutcome = std::result::Result<PingStats, ProbeFailure>;

/// A latency measurement facility
#[async_trait]
pub trait Prober: Send + Sync {
    /// Send `count` echo requests to `host` over `family`, giving up after `timeout`
    async fn probe(&self, host: &str, count: u32, timeout: Duration, family: IpFamily) -> ProbeOutcome;

    /// Short name for logs
    fn name(&self) -> &str;
}
