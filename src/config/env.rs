//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `.env` from the current directory if it exists.
    ///
    /// Returns whether a file was loaded. Variables already set in the
    /// environment are not overwritten.
    pub fn load_env_file() -> Result<bool> {
        Self::load_env_file_from(Path::new(".env"))
    }

    /// Load a specific env file if it exists
    pub fn load_env_file_from(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

        Ok(true)
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# WireGuard Endpoint Pinger Configuration
#
# Values here act as defaults and are overridden by command-line arguments.

# Echo requests sent to each endpoint (1-100)
# WGPING_COUNT=3

# Maximum probes in flight at once (1-1024)
# WGPING_CONCURRENCY=20

# Per-probe timeout in seconds (1-300)
# WGPING_TIMEOUT=5

# Enable colored output (true/false)
# WGPING_ENABLE_COLOR=true

# Search subdirectories for *.conf files (true/false)
# WGPING_RECURSIVE=false
"#.to_string()
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("WGPING_COUNT", "Echo requests per endpoint (1-100)", "3"),
            ("WGPING_CONCURRENCY", "Maximum probes in flight (1-1024)", "20"),
            ("WGPING_TIMEOUT", "Per-probe timeout in seconds (1-300)", "5"),
            ("WGPING_ENABLE_COLOR", "Enable colored output", "true"),
            ("WGPING_RECURSIVE", "Search subdirectories for configs", "false"),
        ]
    }
}
