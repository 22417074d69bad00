//! Configuration data model and validation

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding WireGuard `.conf` files
    #[serde(default)]
    pub directory: PathBuf,

    /// Descend into subdirectories when looking for configs
    #[serde(default)]
    pub recursive: bool,

    /// Echo requests sent per endpoint
    #[serde(default = "default_ping_count")]
    pub ping_count: u32,

    /// Maximum probes in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Hard upper bound on a single probe, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Print the report as JSON instead of a table
    #[serde(default)]
    pub json_output: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            recursive: false,
            ping_count: default_ping_count(),
            concurrency: default_concurrency(),
            timeout_seconds: default_timeout_secs(),
            enable_color: default_enable_color(),
            json_output: false,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validate the configuration and return the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(AppError::usage("A configuration directory is required (positional DIR or -d/--dir)"));
        }

        if self.ping_count == 0 {
            return Err(AppError::validation("Ping count must be greater than 0"));
        }

        if self.ping_count > crate::defaults::MAX_PING_COUNT {
            return Err(AppError::validation(format!(
                "Ping count cannot exceed {}",
                crate::defaults::MAX_PING_COUNT
            )));
        }

        if self.concurrency == 0 {
            return Err(AppError::validation("Concurrency must be greater than 0"));
        }

        if self.concurrency > crate::defaults::MAX_CONCURRENCY {
            return Err(AppError::validation(format!(
                "Concurrency cannot exceed {}",
                crate::defaults::MAX_CONCURRENCY
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::validation("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > crate::defaults::MAX_TIMEOUT_SECS {
            return Err(AppError::validation(format!(
                "Timeout cannot exceed {} seconds",
                crate::defaults::MAX_TIMEOUT_SECS
            )));
        }

        Ok(())
    }

    /// Merge `WGPING_*` environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(count) = std::env::var("WGPING_COUNT") {
            self.ping_count = count.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid WGPING_COUNT value '{}': {}", count, e)))?;
        }

        if let Ok(concurrency) = std::env::var("WGPING_CONCURRENCY") {
            self.concurrency = concurrency.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid WGPING_CONCURRENCY value '{}': {}", concurrency, e)))?;
        }

        if let Ok(timeout) = std::env::var("WGPING_TIMEOUT") {
            self.timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid WGPING_TIMEOUT value '{}': {}", timeout, e)))?;
        }

        if let Ok(enable_color) = std::env::var("WGPING_ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid WGPING_ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        if let Ok(recursive) = std::env::var("WGPING_RECURSIVE") {
            self.recursive = recursive.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid WGPING_RECURSIVE value '{}': {}", recursive, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_ping_count() -> u32 {
    crate::defaults::DEFAULT_PING_COUNT
}

fn default_concurrency() -> usize {
    crate::defaults::DEFAULT_CONCURRENCY
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
