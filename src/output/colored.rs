//! Colored formatter implementation with terminal color support

use crate::{
    error::{AppError, Result},
    extractor::ScanSummary,
    models::ProbeResult,
    report::ReportSummary,
    types::LatencyLevel,
};
use super::formatter::{
    align_text, calculate_column_widths, format_duration, horizontal_border, join_cells,
    result_row, results_table_format, FormattingOptions, OutputFormatter, RowData,
};
use colored::*;
use std::fmt::Write as _;

/// Color for a latency grade
pub fn latency_color(level: LatencyLevel) -> Color {
    match level {
        LatencyLevel::Excellent => Color::Green,
        LatencyLevel::Good => Color::Cyan,
        LatencyLevel::Fair => Color::Yellow,
        LatencyLevel::Poor => Color::Magenta,
        LatencyLevel::VeryPoor => Color::Red,
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            muted: Color::BrightBlack,
            border: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Apply bold formatting if colors are enabled
    fn bold(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    /// Apply dimmed formatting if colors are enabled
    fn dimmed(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.dimmed()
        } else {
            text.normal()
        }
    }

    /// Color one padded cell of a result row
    fn color_cell(&self, column: usize, padded: &str, result: &ProbeResult) -> String {
        match column {
            // Status
            3 if result.reachable => self.colorize(padded, self.color_scheme.success).to_string(),
            3 => self.colorize(padded, self.color_scheme.error).to_string(),
            // Avg Latency
            4 => match result.average_latency_ms {
                Some(latency) => self
                    .colorize(padded, latency_color(LatencyLevel::from_latency_ms(latency)))
                    .to_string(),
                None => self.dimmed(padded).to_string(),
            },
            // Loss
            5 => match result.packet_loss_percent() {
                Some(loss) if loss > 0.0 => self.colorize(padded, self.color_scheme.warning).to_string(),
                _ => padded.to_string(),
            },
            _ if !result.reachable => self.dimmed(padded).to_string(),
            _ => padded.to_string(),
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        let border = "═".repeat(title.chars().count() + 4);

        writeln!(output, "{}", self.colorize(&border, self.color_scheme.border))
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        let title = if self.options.enable_color {
            title.color(self.color_scheme.header).bold()
        } else {
            title.normal()
        };

        writeln!(output, "  {}  ", title)
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        write!(output, "{}", self.colorize(&border, self.color_scheme.border))
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;

        Ok(output)
    }

    fn format_results_table(&self, results: &[ProbeResult]) -> Result<String> {
        if results.is_empty() {
            return Ok(self.colorize("No endpoints were probed.", self.color_scheme.muted).to_string());
        }

        let format = results_table_format(self.options.table_borders);
        let rows: Vec<RowData> = results.iter()
            .enumerate()
            .map(|(idx, result)| result_row(idx + 1, result))
            .collect();
        let widths = calculate_column_widths(&format, &rows);
        let border = self.colorize(&horizontal_border(&widths), self.color_scheme.border).to_string();

        let mut lines = Vec::with_capacity(rows.len() + 4);

        let header_cells: Vec<String> = format.columns.iter()
            .zip(&widths)
            .map(|(column, &width)| self.bold(&align_text(&column.header, width, &column.alignment)).to_string())
            .collect();
        if format.show_borders {
            lines.push(border.clone());
        }
        lines.push(join_cells(&header_cells, format.show_borders));
        if format.show_borders {
            lines.push(border.clone());
        }

        for (row, result) in rows.iter().zip(results) {
            // Pad before coloring so escape codes do not count toward width
            let cells: Vec<String> = row.iter()
                .zip(format.columns.iter().zip(&widths))
                .enumerate()
                .map(|(idx, (cell, (column, &width)))| {
                    self.color_cell(idx, &align_text(cell, width, &column.alignment), result)
                })
                .collect();
            lines.push(join_cells(&cells, format.show_borders));
        }

        if format.show_borders {
            lines.push(border);
        }

        let mut output = lines.join("\n");

        if self.options.verbose_mode {
            for result in results.iter().filter(|r| !r.reachable) {
                if let Some(failure) = &result.failure {
                    write!(
                        output,
                        "\n  {} {}",
                        self.colorize(&format!("{}:", result.host), self.color_scheme.error),
                        self.dimmed(&failure.to_string())
                    )
                    .map_err(|e| AppError::io(format!("Failed to format table: {}", e)))?;
                }
            }
        }

        Ok(output)
    }

    fn format_summary(&self, summary: &ReportSummary) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "{}", self.colorize("Summary", self.color_scheme.header))
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(output, "Endpoints:    {}", self.colorize(&summary.total.to_string(), self.color_scheme.info))
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(output, "Reachable:    {}", self.colorize(&summary.reachable.to_string(), self.color_scheme.success))
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;

        let unreachable = summary.unreachable.to_string();
        let unreachable = if summary.unreachable > 0 {
            self.colorize(&unreachable, self.color_scheme.error)
        } else {
            self.dimmed(&unreachable)
        };
        writeln!(output, "Unreachable:  {}", unreachable)
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;

        let fastest = match &summary.fastest {
            Some(host) => self.bold(host).to_string(),
            None => self.dimmed("-").to_string(),
        };
        writeln!(output, "Fastest:      {}", fastest)
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        write!(output, "Duration:     {}", format_duration(summary.total_duration.as_secs_f64() * 1000.0))
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;

        Ok(output)
    }

    fn format_scan_summary(&self, scan: &ScanSummary, duplicates_skipped: usize) -> Result<String> {
        let skipped = scan.files_skipped.to_string();
        let skipped = if scan.files_skipped > 0 {
            self.colorize(&skipped, self.color_scheme.warning)
        } else {
            skipped.normal()
        };
        let malformed = scan.malformed_lines.to_string();
        let malformed = if scan.malformed_lines > 0 {
            self.colorize(&malformed, self.color_scheme.warning)
        } else {
            malformed.normal()
        };

        Ok(format!(
            "Scanned {} file(s): {} unreadable, {} malformed endpoint line(s), {} endpoint(s) found, {} duplicate(s) skipped",
            self.colorize(&scan.files_scanned.to_string(), self.color_scheme.info),
            skipped,
            malformed,
            scan.endpoints_found,
            duplicates_skipped
        ))
    }
}
