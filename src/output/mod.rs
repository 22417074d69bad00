//! Output formatting and display system
//!
//! Renders a [`Report`] as a plain table, a colored table or a JSON document.

mod colored;
mod formatter;
mod json;

pub use formatter::{
    format_latency,
    Alignment,
    Column,
    FormattingOptions,
    OutputFormatter,
    PlainFormatter,
    RowData,
    TableFormat,
};
pub use colored::{latency_color, ColorScheme, ColoredFormatter};
pub use json::JsonFormatter;

use crate::{
    error::Result,
    extractor::ScanSummary,
    report::Report,
};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on output mode, color support and verbosity
    pub fn create_formatter(enable_color: bool, json_output: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        if json_output {
            return Box::new(JsonFormatter::new());
        }

        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            table_borders: true,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(false, false, false)
    }
}

/// Main output coordinator that handles all result display
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
}

impl OutputCoordinator {
    /// Create a new output coordinator with the specified formatter
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    /// Render the full report for stdout
    pub fn display_report(&self, report: &Report) -> Result<String> {
        self.formatter.format_report(report)
    }

    /// Render the scan counters for stderr
    pub fn display_scan_summary(&self, scan: &ScanSummary, duplicates_skipped: usize) -> Result<String> {
        self.formatter.format_scan_summary(scan, duplicates_skipped)
    }
}
