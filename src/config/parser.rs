//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    models::Config,
    error::{AppError, Result},
    config::env::EnvManager,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
    load_env_file: bool,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            load_env_file: true,
        }
    }

    /// Skip reading `.env` from the current directory
    pub fn without_env_file(mut self) -> Self {
        self.load_env_file = false;
        self
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        self.cli.validate().map_err(AppError::usage)?;

        let mut config = Config::default();

        if self.load_env_file {
            EnvManager::load_env_file()?;
        }

        config.merge_from_env()?;

        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(directory) = self.cli.directory() {
            config.directory = directory.clone();
        }

        if let Some(count) = self.cli.count {
            config.ping_count = count;
        }

        if let Some(concurrency) = self.cli.concurrency {
            config.concurrency = concurrency;
        }

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if self.cli.recursive {
            config.recursive = true;
        }

        config.json_output = self.cli.json;
        config.enable_color = self.cli.resolve_color(config.enable_color) && !config.json_output;

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    [
        format!("Directory: {}", config.directory.display()),
        format!("Recursive: {}", config.recursive),
        format!("Ping Count: {}", config.ping_count),
        format!("Concurrency: {}", config.concurrency),
        format!("Timeout: {}s", config.timeout_seconds),
        format!("Color Output: {}", config.enable_color),
        format!("JSON Output: {}", config.json_output),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ]
    .join("\n")
}
