//! Command-line interface module with topic help system

pub mod help;

pub use help::HelpSystem;

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

/// WireGuard Endpoint Pinger - ping every peer endpoint in a directory of WireGuard configs
#[derive(Parser, Debug, Clone)]
#[command(name = "wgping")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing WireGuard *.conf files
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Directory containing WireGuard *.conf files (alternative to DIR)
    #[arg(short = 'd', long = "dir", value_name = "DIR", conflicts_with = "directory")]
    pub dir: Option<PathBuf>,

    /// Echo requests sent to each endpoint (1-100) [default: 3]
    #[arg(short, long, value_name = "COUNT", value_parser = parse_count)]
    pub count: Option<u32>,

    /// Maximum probes in flight at once (1-1024) [default: 20]
    #[arg(short = 'P', long, value_name = "N", value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// Per-probe timeout in seconds (1-300) [default: 5]
    #[arg(short, long, value_name = "SECS", value_parser = parse_duration)]
    pub timeout: Option<u64>,

    /// Also search subdirectories for *.conf files
    #[arg(short, long)]
    pub recursive: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Show help for specific topic (config, env, examples, exit-codes, output, ping)
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.help_topic.is_none() && self.directory().is_none() {
            return Err("A configuration directory is required (positional DIR or -d/--dir)".to_string());
        }

        Ok(())
    }

    /// Directory given either positionally or with `--dir`
    pub fn directory(&self) -> Option<&PathBuf> {
        self.directory.as_ref().or(self.dir.as_ref())
    }

    /// Check if help should be displayed for a specific topic
    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    /// Resolve color output: explicit flags win, then the configured default, then terminal detection
    pub fn resolve_color(&self, configured: bool) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            configured && supports_color()
        }
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        self.resolve_color(crate::defaults::DEFAULT_ENABLE_COLOR)
    }

    /// Display help for the specified topic
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();

        match &self.help_topic {
            Some(topic) => help_system.display_topic_help(topic, use_colors)
                .unwrap_or_else(|| {
                    format!(
                        "Unknown help topic: '{}'\n\nAvailable topics: {}\n",
                        topic,
                        HelpSystem::topics().join(", ")
                    )
                }),
            None => help_system.display_topic_help("examples", use_colors).unwrap_or_default(),
        }
    }
}

fn parse_in_range(s: &str, what: &str, min: u64, max: u64) -> Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid {}: {}", what, s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid {}: {}", what, s))
        .and_then(|value| {
            if value < min {
                Err(format!("{} must be at least {}", what, min))
            } else if value > max {
                Err(format!("{} cannot exceed {}", what, max))
            } else {
                Ok(value)
            }
        })
}

/// Parse the per-endpoint packet count
fn parse_count(s: &str) -> Result<u32, String> {
    parse_in_range(s, "count", 1, u64::from(crate::defaults::MAX_PING_COUNT)).map(|v| v as u32)
}

/// Parse the probe concurrency limit
fn parse_concurrency(s: &str) -> Result<usize, String> {
    parse_in_range(s, "concurrency", 1, crate::defaults::MAX_CONCURRENCY as u64).map(|v| v as usize)
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> Result<u64, String> {
    parse_in_range(s, "duration", 1, crate::defaults::MAX_TIMEOUT_SECS)
}

/// Check if the terminal supports color output
pub fn supports_color() -> bool {
    detect_color_support(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
}

/// Color decision from environment lookups and whether stdout is a terminal
fn detect_color_support(var: impl Fn(&str) -> Option<String>, stdout_is_terminal: bool) -> bool {
    if var("TERM").as_deref() == Some("dumb") {
        return false;
    }

    if var("NO_COLOR").is_some() {
        return false;
    }

    if var("FORCE_COLOR").is_some() {
        return true;
    }

    #[cfg(target_os = "windows")]
    {
        if var("ANSICON").is_some() || var("ConEmuANSI").is_some() {
            return true;
        }
    }

    cfg!(unix) && stdout_is_terminal
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_basic() {
        let cli = Cli::parse_from(["wgping", "/etc/wireguard", "--count", "5", "--timeout", "10"]);
        assert_eq!(cli.directory(), Some(&PathBuf::from("/etc/wireguard")));
        assert_eq!(cli.count, Some(5));
        assert_eq!(cli.timeout, Some(10));
        assert_eq!(cli.concurrency, None);
        assert!(!cli.verbose);
        assert!(!cli.recursive);
    }

    #[test]
    fn test_cli_parsing_short_options() {
        let cli = Cli::parse_from(["wgping", "-d", "configs", "-c", "2", "-P", "8", "-t", "3", "-r"]);
        assert_eq!(cli.directory(), Some(&PathBuf::from("configs")));
        assert_eq!(cli.count, Some(2));
        assert_eq!(cli.concurrency, Some(8));
        assert_eq!(cli.timeout, Some(3));
        assert!(cli.recursive);
    }

    #[test]
    fn test_positional_and_dir_conflict() {
        assert!(Cli::try_parse_from(["wgping", "a", "--dir", "b"]).is_err());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Cli::try_parse_from(["wgping", "d", "-c", "0"]).is_err());
        assert!(Cli::try_parse_from(["wgping", "d", "-c", "101"]).is_err());
        assert!(Cli::try_parse_from(["wgping", "d", "-P", "0"]).is_err());
        assert!(Cli::try_parse_from(["wgping", "d", "-P", "1025"]).is_err());
        assert!(Cli::try_parse_from(["wgping", "d", "-t", "301"]).is_err());
        assert!(Cli::try_parse_from(["wgping", "d", "-c", "abc"]).is_err());
    }

    #[test]
    fn test_duration_parsing() {
        assert_eq!(parse_duration("10").unwrap(), 10);
        assert_eq!(parse_duration("300").unwrap(), 300);
        assert_eq!(parse_duration("1").unwrap(), 1);

        assert!(parse_duration("0").is_err());
        assert!(parse_duration("301").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("10.5").is_err());
        assert!(parse_duration("+10").is_err());
        assert!(parse_duration("0x10").is_err());
        assert!(parse_duration("-5").is_err());
    }

    #[test]
    fn test_count_and_concurrency_parsing() {
        assert_eq!(parse_count("1").unwrap(), 1);
        assert_eq!(parse_count("100").unwrap(), 100);
        assert_eq!(parse_concurrency("1024").unwrap(), 1024);
        assert!(parse_concurrency("18446744073709551615").is_err());
    }

    #[test]
    fn test_cli_validation() {
        let cli_conflict = Cli::parse_from(["wgping", "d", "--color", "--no-color"]);
        assert!(cli_conflict.validate().unwrap_err().contains("Cannot specify both --color and --no-color"));

        let cli_no_dir = Cli::parse_from(["wgping"]);
        assert!(cli_no_dir.validate().unwrap_err().contains("directory is required"));

        let cli_topic_only = Cli::parse_from(["wgping", "--help-topic", "env"]);
        assert!(cli_topic_only.validate().is_ok());

        assert!(Cli::parse_from(["wgping", "d"]).validate().is_ok());
    }

    #[test]
    fn test_color_resolution() {
        assert!(Cli::parse_from(["wgping", "d", "--color"]).resolve_color(false));
        assert!(!Cli::parse_from(["wgping", "d", "--no-color"]).resolve_color(true));
        assert!(!Cli::parse_from(["wgping", "d"]).resolve_color(false));
    }

    #[test]
    fn test_help_topics() {
        for &topic in HelpSystem::topics() {
            let cli = Cli::parse_from(["wgping", "--help-topic", topic]);
            let help = cli.display_help();
            assert!(!help.is_empty());
            assert!(!help.contains("Unknown help topic"));
        }

        let cli = Cli::parse_from(["wgping", "--help-topic", "nope"]);
        let help = cli.display_help();
        assert!(help.contains("Unknown help topic"));
        assert!(help.contains("Available topics:"));
    }

    #[test]
    fn test_color_support_follows_terminal() {
        let unset = |_: &str| -> Option<String> { None };
        assert!(!detect_color_support(unset, false));
        #[cfg(unix)]
        assert!(detect_color_support(unset, true));

        let forced = |key: &str| (key == "FORCE_COLOR").then(|| "1".to_string());
        assert!(detect_color_support(forced, false));

        let disabled = |key: &str| (key == "NO_COLOR" || key == "FORCE_COLOR").then(|| "1".to_string());
        assert!(!detect_color_support(disabled, true));

        let dumb = |key: &str| (key == "TERM").then(|| "dumb".to_string());
        assert!(!detect_color_support(dumb, true));
    }
}
