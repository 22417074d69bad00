//! Probe outcome models

use crate::models::endpoint::{source_display_name, Endpoint};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Round-trip statistics parsed from a ping summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingStats {
    /// Packets sent
    pub transmitted: u32,
    /// Replies received
    pub received: u32,
    /// Reported packet loss, 0.0 - 100.0
    pub loss_percent: f64,
    pub min_ms: f64,
    pub avg_ms: f64,
    pub max_ms: f64,
}

/// Why a probe was recorded as unreachable
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProbeFailure {
    /// The probe exceeded its deadline and was killed
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// No echo reply came back
    #[error("100% packet loss")]
    TotalLoss,

    /// The ping summary had no round-trip line
    #[error("unparseable ping output")]
    Unparseable,

    /// The ping process could not be started
    #[error("failed to run ping: {0}")]
    Spawn(String),

    /// The probe task itself failed
    #[error("probe task failed: {0}")]
    Aborted(String),
}

/// Outcome of probing one unique endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub host: String,
    pub source_path: PathBuf,
    /// Whether any echo reply came back with a parsable average
    pub reachable: bool,
    /// Mean round-trip time; `None` exactly when unreachable
    pub average_latency_ms: Option<f64>,
    /// Full statistics when the summary could be parsed
    pub stats: Option<PingStats>,
    /// Reason for unreachability
    pub failure: Option<ProbeFailure>,
    /// Wall-clock time the probe took
    pub elapsed: Duration,
}

impl ProbeResult {
    /// Build a result from a prober outcome
    pub fn from_outcome(
        endpoint: &Endpoint,
        outcome: std::result::Result<PingStats, ProbeFailure>,
        elapsed: Duration,
    ) -> Self {
        match outcome {
            Ok(stats) => Self {
                host: endpoint.host.clone(),
                source_path: endpoint.source_path.clone(),
                reachable: true,
                average_latency_ms: Some(stats.avg_ms),
                stats: Some(stats),
                failure: None,
                elapsed,
            },
            Err(failure) => Self::unreachable(endpoint, failure, elapsed),
        }
    }

    /// Build an unreachable result
    pub fn unreachable(endpoint: &Endpoint, failure: ProbeFailure, elapsed: Duration) -> Self {
        Self {
            host: endpoint.host.clone(),
            source_path: endpoint.source_path.clone(),
            reachable: false,
            average_latency_ms: None,
            stats: None,
            failure: Some(failure),
            elapsed,
        }
    }

    /// Latency used for ordering; unreachable sorts as +infinity
    pub fn sort_key(&self) -> f64 {
        match (self.reachable, self.average_latency_ms) {
            (true, Some(latency)) => latency,
            _ => f64::INFINITY,
        }
    }

    /// Ascending latency with unreachable results after every measured one
    pub fn cmp_latency(&self, other: &Self) -> Ordering {
        self.sort_key().total_cmp(&other.sort_key())
    }

    /// Packet loss, when known
    pub fn packet_loss_percent(&self) -> Option<f64> {
        match (&self.stats, &self.failure) {
            (Some(stats), _) => Some(stats.loss_percent),
            (None, Some(ProbeFailure::TotalLoss)) => Some(100.0),
            _ => None,
        }
    }

    /// File name of the config that declared this endpoint
    pub fn source_name(&self) -> String {
        source_display_name(&self.source_path)
    }
}
