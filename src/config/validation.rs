//! Configuration validation utilities and rules

use crate::{
    error::Result,
    models::Config,
};
use colored::*;

/// Seconds between echo requests for the system ping
const PING_INTERVAL_SECS: u64 = 1;

/// Concurrency above which process and socket limits become a concern
const HIGH_CONCURRENCY: usize = 256;

/// Configuration validator with advisory rules on top of `Config::validate`
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration, returning non-fatal warnings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_probe_settings(config));
        warnings.extend(Self::validate_concurrency(config));
        Ok(warnings)
    }

    /// Packet count against timeout
    fn validate_probe_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        // The last request leaves (count - 1) intervals after the first
        let needed_secs = u64::from(config.ping_count.saturating_sub(1)) * PING_INTERVAL_SECS;
        if config.timeout_seconds <= needed_secs {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Timeout of {}s is too short to send {} packets at {}s intervals; probes will be cut off and reported unreachable",
                    config.timeout_seconds, config.ping_count, PING_INTERVAL_SECS
                ),
            ));
        }

        if config.ping_count < 3 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Ping count of {} gives a noisy average (recommended: >= 3)", config.ping_count),
            ));
        } else if config.ping_count > 20 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Ping count of {} adds about {}s to every probe", config.ping_count, config.ping_count),
            ));
        }

        if config.timeout_seconds > 60 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Long timeout of {}s will slow down detection of dead endpoints", config.timeout_seconds),
            ));
        }

        warnings
    }

    fn validate_concurrency(config: &Config) -> Vec<ValidationWarning> {
        if config.concurrency > HIGH_CONCURRENCY {
            vec![ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Concurrency of {} runs that many ping processes at once and may hit process or socket limits",
                    config.concurrency
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Validation warning levels
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }

    /// Get color for terminal display
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Warning => Color::Yellow,
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        if use_color {
            format!("{} {}", tag.color(self.level.color()), self.message)
        } else {
            format!("{} {}", tag, self.message)
        }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config() -> Config {
        Config {
            directory: PathBuf::from("/etc/wireguard"),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_produce_no_warnings() {
        assert!(validate_config(&config()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = Config {
            ping_count: 0,
            ..config()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_timeout_shorter_than_packet_train() {
        let config = Config {
            ping_count: 10,
            timeout_seconds: 5,
            ..config()
        };

        let warnings = validate_config(&config).unwrap();
        assert!(warnings.iter().any(|w| w.level == ValidationLevel::Warning && w.message.contains("too short")));
    }

    #[test]
    fn test_high_concurrency_warning() {
        let config = Config {
            concurrency: 512,
            ..config()
        };

        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("512"));
    }

    #[test]
    fn test_warning_format() {
        let warning = ValidationWarning::new(ValidationLevel::Info, "hello".to_string());
        assert_eq!(warning.format(false), "[INFO] hello");
    }
}
