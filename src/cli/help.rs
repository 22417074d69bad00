//! Topic help with examples and detailed guidance
//!
//! `--help` is clap's generated reference; `--help-topic TOPIC` prints the
//! longer explanations kept here.

use crate::{
    config::env::EnvManager,
    probe::SystemPinger,
    types::IpFamily,
};
use colored::*;
use std::time::Duration;

const TOPICS: &[&str] = &["config", "env", "examples", "exit-codes", "output", "ping"];

/// Help system for the CLI application
pub struct HelpSystem {
    platform: String,
}

impl HelpSystem {
    /// Create a new help system
    pub fn new() -> Self {
        Self {
            platform: platform_name().to_string(),
        }
    }

    /// Names accepted by `--help-topic`
    pub fn topics() -> &'static [&'static str] {
        TOPICS
    }

    /// Display help for a specific topic
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "config" | "configuration" => Some(self.format_configuration_help(use_colors)),
            "env" | "environment" => Some(self.format_environment_help(use_colors)),
            "examples" => Some(self.format_examples_section(use_colors)),
            "exit-codes" | "exit" => Some(self.format_exit_codes_help(use_colors)),
            "output" | "formatting" => Some(self.format_output_help(use_colors)),
            "ping" => Some(self.format_ping_help(use_colors)),
            _ => None,
        }
    }

    fn section_header(&self, title: &str, use_colors: bool) -> String {
        if use_colors {
            title.bright_green().bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Format the examples section
    fn format_examples_section(&self, use_colors: bool) -> String {
        let examples = vec![
            ExampleHelp {
                title: "Rank every tunnel in the system directory",
                command: "wgping /etc/wireguard",
                description: "Ping each peer endpoint 3 times, 20 at a time, 5 second timeout",
            },
            ExampleHelp {
                title: "A large provider bundle",
                command: "wgping -d ~/vpn/configs -r -P 64 -c 2",
                description: "Search subdirectories, 64 probes in flight, 2 packets per endpoint",
            },
            ExampleHelp {
                title: "Pick the fastest server from a script",
                command: "wgping ~/vpn/configs --json | jq -r '.summary.fastest'",
                description: "Emit JSON and extract the host with the lowest average latency",
            },
            ExampleHelp {
                title: "Slow links",
                command: "wgping ~/vpn/configs --timeout 15 --count 5 --verbose",
                description: "Allow 15 seconds per probe and show failure reasons",
            },
        ];

        let mut output = format!("{}\n", self.section_header("EXAMPLES:", use_colors));
        for example in examples {
            output.push_str(&example.format(use_colors));
            output.push('\n');
        }

        output
    }

    /// Format detailed configuration help
    fn format_configuration_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", self.section_header("CONFIGURATION REFERENCE:", use_colors));

        help.push_str("CONFIGURATION PRIORITY (highest to lowest):\n");
        help.push_str("1. Command-line arguments\n");
        help.push_str("2. Environment variables\n");
        help.push_str("3. .env file in the current directory\n");
        help.push_str("4. Default values\n\n");

        help.push_str("PARAMETER LIMITS:\n");
        help.push_str(&format!("- Ping count: 1-{} packets (default {})\n",
            crate::defaults::MAX_PING_COUNT, crate::defaults::DEFAULT_PING_COUNT));
        help.push_str(&format!("- Concurrency: 1-{} probes (default {})\n",
            crate::defaults::MAX_CONCURRENCY, crate::defaults::DEFAULT_CONCURRENCY));
        help.push_str(&format!("- Timeout: 1-{} seconds (default {})\n",
            crate::defaults::MAX_TIMEOUT_SECS, crate::defaults::DEFAULT_TIMEOUT.as_secs()));
        help.push_str("- The timeout bounds a whole probe; it should exceed the packet count\n");
        help.push_str("  because ping sends one packet per second\n");

        help
    }

    /// Format detailed environment help
    fn format_environment_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", self.section_header("ENVIRONMENT VARIABLES:", use_colors));

        for (var_name, description, example) in EnvManager::get_supported_env_vars() {
            if use_colors {
                help.push_str(&format!("  {:<20} {}\n", var_name.bright_yellow().bold(), description));
            } else {
                help.push_str(&format!("  {:<20} {}\n", var_name, description));
            }
            help.push_str(&format!("  {:<20} Example: {}\n", "", example));
        }

        help.push_str("\nValues may also be placed in a .env file in the current directory.\n");
        help.push_str("NO_COLOR disables and FORCE_COLOR enables colored output.\n");
        help.push_str(&format!("\n{}\n\n", self.section_header("EXAMPLE .env FILE:", use_colors)));
        help.push_str(&EnvManager::create_example_env_content());

        help
    }

    /// Format exit code reference
    fn format_exit_codes_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", self.section_header("EXIT CODES:", use_colors));

        let codes = [
            (0, "Report printed (unreachable endpoints do not change this)"),
            (1, "Missing or invalid arguments or configuration"),
            (2, "Directory not found, or no *.conf files in it"),
            (3, "No Endpoint lines found in any [Peer] section"),
            (99, "Internal error"),
        ];

        for (code, meaning) in codes {
            if use_colors {
                help.push_str(&format!("  {:>3}  {}\n", code.to_string().bright_cyan(), meaning));
            } else {
                help.push_str(&format!("  {:>3}  {}\n", code, meaning));
            }
        }

        help
    }

    /// Format output help
    fn format_output_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", self.section_header("OUTPUT FORMAT:", use_colors));

        help.push_str("The report lists one row per unique endpoint host, fastest first:\n");
        help.push_str("  #            rank by average round-trip time\n");
        help.push_str("  Source       config file the host was first seen in\n");
        help.push_str("  Host         hostname or IP literal, without port\n");
        help.push_str("  Status       reachable, or unreachable (no reply, timeout, bad output)\n");
        help.push_str("  Avg Latency  mean round-trip time in ms, '-' when unreachable\n");
        help.push_str("  Loss         packet loss reported by ping\n\n");

        help.push_str("LATENCY GRADES (colored output):\n");
        help.push_str("  Excellent < 50ms, Good < 100ms, Fair < 200ms, Poor < 500ms, Very Poor above\n\n");

        help.push_str("--json prints {\"results\": [...], \"summary\": {...}} instead of the table.\n");
        help.push_str("Logs and warnings always go to stderr.\n");

        help
    }

    /// Format the ping command used on this platform
    fn format_ping_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", self.section_header("PING COMMAND:", use_colors));
        let pinger = SystemPinger::new();
        let timeout = crate::defaults::DEFAULT_TIMEOUT;
        let count = crate::defaults::DEFAULT_PING_COUNT;

        help.push_str(&format!("Commands run on {} with default settings:\n", self.platform));
        for (family, host) in [(IpFamily::V4, "<host>"), (IpFamily::V6, "<ipv6-literal>")] {
            let invocation = pinger.invocation(host, count, timeout, family);
            let command = format!("{} {}", invocation.program, invocation.args.join(" "));
            if use_colors {
                help.push_str(&format!("  {:<5} {}\n", family.to_string(), command.bright_white()));
            } else {
                help.push_str(&format!("  {:<5} {}\n", family.to_string(), command));
            }
        }

        help.push_str("\nHosts containing ':' are probed over IPv6, everything else over IPv4.\n");
        help.push_str(&format!(
            "A probe still running after the timeout ({}s by default) is killed and reported unreachable.\n",
            timeout.as_secs()
        ));
        help.push_str("ping gets a deadline one second shorter, so hosts with partial loss still report statistics.\n");

        help
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn platform_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "macOS",
        "linux" => "Linux",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

/// Helper struct for formatting examples
struct ExampleHelp {
    title: &'static str,
    command: &'static str,
    description: &'static str,
}

impl ExampleHelp {
    fn format(&self, use_colors: bool) -> String {
        if use_colors {
            format!("  {}:\n    {}\n    {}\n",
                self.title.bright_yellow().bold(),
                self.command.bright_white(),
                self.description.bright_blue().italic()
            )
        } else {
            format!("  {}:\n    {}\n    {}\n",
                self.title, self.command, self.description
            )
        }
    }
}
