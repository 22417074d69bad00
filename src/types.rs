//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Transport family used when probing a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpFamily {
    /// IPv4 (hostnames resolve over IPv4 too)
    V4,
    /// IPv6, selected for any host that contains a colon
    V6,
}

impl IpFamily {
    /// Pick the family for a host string as extracted from a config.
    ///
    /// Only IPv6 literals can contain `:` once the port has been stripped,
    /// so that is the whole test.
    pub fn for_host(host: &str) -> Self {
        if host.contains(':') {
            Self::V6
        } else {
            Self::V4
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Latency grade used for colouring the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyLevel {
    /// < 50ms
    Excellent,
    /// 50-100ms
    Good,
    /// 100-200ms
    Fair,
    /// 200-500ms
    Poor,
    /// > 500ms
    VeryPoor,
}

impl LatencyLevel {
    /// Classify a round-trip average in milliseconds
    pub fn from_latency_ms(latency_ms: f64) -> Self {
        if latency_ms < 50.0 {
            Self::Excellent
        } else if latency_ms < 100.0 {
            Self::Good
        } else if latency_ms < 200.0 {
            Self::Fair
        } else if latency_ms < 500.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Get descriptive text
    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}
