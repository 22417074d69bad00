//! Core formatting traits and implementations
//!
//! This module defines the output formatting interface and provides
//! a plain text implementation with table formatting capabilities.

use crate::{
    error::{AppError, Result},
    extractor::ScanSummary,
    models::ProbeResult,
    report::{Report, ReportSummary},
};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format sorted probe results, one row per endpoint
    fn format_results_table(&self, results: &[ProbeResult]) -> Result<String>;

    /// Format the totals under the table
    fn format_summary(&self, summary: &ReportSummary) -> Result<String>;

    /// Format the scan counters shown in verbose mode
    fn format_scan_summary(&self, scan: &ScanSummary, duplicates_skipped: usize) -> Result<String>;

    /// Format a complete report
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header("WireGuard Endpoint Latency")?);
        output.push_str("\n\n");
        output.push_str(&self.format_results_table(&report.results)?);
        output.push_str("\n\n");
        output.push_str(&self.format_summary(&report.summary)?);
        Ok(output)
    }
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Enable verbose mode with detailed information
    pub verbose_mode: bool,
    /// Show table borders
    pub table_borders: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            table_borders: true,
        }
    }
}

/// Table formatting configuration
#[derive(Debug, Clone)]
pub struct TableFormat {
    /// Column definitions
    pub columns: Vec<Column>,
    /// Show borders around table
    pub show_borders: bool,
    /// Minimum column width
    pub min_column_width: usize,
    /// Maximum column width
    pub max_column_width: usize,
}

/// Column definition for table formatting
#[derive(Debug, Clone)]
pub struct Column {
    /// Column header
    pub header: String,
    /// Column alignment
    pub alignment: Alignment,
    /// Minimum width
    pub min_width: usize,
    /// Maximum width
    pub max_width: usize,
}

impl Column {
    fn new(header: &str, alignment: Alignment, min_width: usize, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            alignment,
            min_width,
            max_width,
        }
    }
}

/// Text alignment options
#[derive(Debug, Clone)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// Row data for table formatting
pub type RowData = Vec<String>;

/// Column layout of the result table
pub(crate) fn results_table_format(show_borders: bool) -> TableFormat {
    TableFormat {
        columns: vec![
            Column::new("#", Alignment::Right, 1, 4),
            Column::new("Source", Alignment::Left, 6, 40),
            Column::new("Host", Alignment::Left, 4, 64),
            Column::new("Status", Alignment::Left, 11, 11),
            Column::new("Avg Latency", Alignment::Right, 11, 14),
            Column::new("Loss", Alignment::Right, 6, 6),
        ],
        show_borders,
        min_column_width: 4,
        max_column_width: 64,
    }
}

/// Plain cell text for one result, in table column order
pub(crate) fn result_row(rank: usize, result: &ProbeResult) -> RowData {
    vec![
        rank.to_string(),
        result.source_name(),
        result.host.clone(),
        status_text(result).to_string(),
        format_latency(result.average_latency_ms),
        result.packet_loss_percent()
            .map(format_percentage)
            .unwrap_or_else(|| "-".to_string()),
    ]
}

pub(crate) fn status_text(result: &ProbeResult) -> &'static str {
    if result.reachable {
        "reachable"
    } else {
        "unreachable"
    }
}

/// Latency as `"<value> ms"` with two decimals, `"-"` when unknown
pub fn format_latency(latency_ms: Option<f64>) -> String {
    match latency_ms {
        Some(latency) => format!("{:.2} ms", latency),
        None => "-".to_string(),
    }
}

/// Format duration in human-readable format
pub(crate) fn format_duration(duration_ms: f64) -> String {
    if duration_ms < 1000.0 {
        format!("{:.0}ms", duration_ms)
    } else if duration_ms < 60000.0 {
        format!("{:.2}s", duration_ms / 1000.0)
    } else {
        let minutes = (duration_ms / 60000.0) as u32;
        let seconds = (duration_ms % 60000.0) / 1000.0;
        format!("{}m{:.1}s", minutes, seconds)
    }
}

/// Format percentage with appropriate precision
pub(crate) fn format_percentage(percentage: f64) -> String {
    if percentage >= 99.95 {
        "100%".to_string()
    } else if percentage < 0.05 {
        "0%".to_string()
    } else {
        format!("{:.1}%", percentage)
    }
}

/// Calculate column widths: widest cell, clamped to the column's bounds
pub(crate) fn calculate_column_widths(format: &TableFormat, rows: &[RowData]) -> Vec<usize> {
    let num_columns = format.columns.len().max(
        rows.iter().map(|r| r.len()).max().unwrap_or(0)
    );

    (0..num_columns)
        .map(|col_idx| {
            let column = format.columns.get(col_idx);
            let mut width = column
                .map(|c| c.min_width.max(c.header.chars().count()))
                .unwrap_or(format.min_column_width);

            for row in rows {
                if let Some(cell) = row.get(col_idx) {
                    width = width.max(cell.chars().count());
                }
            }

            width.min(column.map(|c| c.max_width).unwrap_or(format.max_column_width))
        })
        .collect()
}

/// Align text within specified width, truncating when it does not fit
pub(crate) fn align_text(text: &str, width: usize, alignment: &Alignment) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }

    let padding = width - len;
    match alignment {
        Alignment::Left => format!("{}{}", text, " ".repeat(padding)),
        Alignment::Right => format!("{}{}", " ".repeat(padding), text),
        Alignment::Center => {
            let left_pad = padding / 2;
            let right_pad = padding - left_pad;
            format!("{}{}{}", " ".repeat(left_pad), text, " ".repeat(right_pad))
        }
    }
}

/// Horizontal border for a bordered table
pub(crate) fn horizontal_border(widths: &[usize]) -> String {
    let mut border = String::new();

    if !widths.is_empty() {
        border.push('+');
        for &width in widths {
            border.push_str(&"-".repeat(width + 2));
            border.push('+');
        }
    }

    border
}

/// Join already-padded cells into one table line
pub(crate) fn join_cells(cells: &[String], show_borders: bool) -> String {
    if show_borders {
        let mut row = String::from("|");
        for cell in cells {
            row.push(' ');
            row.push_str(cell);
            row.push_str(" |");
        }
        row
    } else {
        cells.join("  ").trim_end().to_string()
    }
}

fn fmt_err(context: &str) -> impl Fn(std::fmt::Error) -> AppError + '_ {
    move |e| AppError::io(format!("Failed to format {}: {}", context, e))
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    /// Create a table with the given format and data
    fn create_table(&self, format: &TableFormat, rows: &[RowData]) -> String {
        let widths = calculate_column_widths(format, rows);
        let mut lines = Vec::with_capacity(rows.len() + 4);

        let headers: RowData = format.columns.iter().map(|c| c.header.clone()).collect();
        if format.show_borders {
            lines.push(horizontal_border(&widths));
        }
        lines.push(self.create_row(&headers, &widths, format));
        if format.show_borders {
            lines.push(horizontal_border(&widths));
        }

        for row in rows {
            lines.push(self.create_row(row, &widths, format));
        }

        if format.show_borders {
            lines.push(horizontal_border(&widths));
        }

        lines.join("\n")
    }

    /// Create a table row
    fn create_row(&self, data: &[String], widths: &[usize], format: &TableFormat) -> String {
        let cells: Vec<String> = data.iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(idx, (cell, &width))| {
                let alignment = format.columns.get(idx)
                    .map(|c| &c.alignment)
                    .unwrap_or(&Alignment::Left);
                align_text(cell, width, alignment)
            })
            .collect();

        join_cells(&cells, format.show_borders)
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        let border = "=".repeat(title.len() + 4);

        writeln!(output, "{}", border).map_err(fmt_err("header"))?;
        writeln!(output, "  {}  ", title).map_err(fmt_err("header"))?;
        write!(output, "{}", border).map_err(fmt_err("header"))?;

        Ok(output)
    }

    fn format_results_table(&self, results: &[ProbeResult]) -> Result<String> {
        if results.is_empty() {
            return Ok("No endpoints were probed.".to_string());
        }

        let rows: Vec<RowData> = results.iter()
            .enumerate()
            .map(|(idx, result)| result_row(idx + 1, result))
            .collect();

        let mut output = self.create_table(&results_table_format(self.options.table_borders), &rows);

        if self.options.verbose_mode {
            for result in results.iter().filter(|r| !r.reachable) {
                if let Some(failure) = &result.failure {
                    write!(output, "\n  {}: {}", result.host, failure).map_err(fmt_err("table"))?;
                }
            }
        }

        Ok(output)
    }

    fn format_summary(&self, summary: &ReportSummary) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "Summary:").map_err(fmt_err("summary"))?;
        writeln!(output, "--------").map_err(fmt_err("summary"))?;
        writeln!(output, "Endpoints:    {}", summary.total).map_err(fmt_err("summary"))?;
        writeln!(output, "Reachable:    {}", summary.reachable).map_err(fmt_err("summary"))?;
        writeln!(output, "Unreachable:  {}", summary.unreachable).map_err(fmt_err("summary"))?;
        writeln!(output, "Fastest:      {}", summary.fastest.as_deref().unwrap_or("-"))
            .map_err(fmt_err("summary"))?;
        write!(output, "Duration:     {}", format_duration(summary.total_duration.as_secs_f64() * 1000.0))
            .map_err(fmt_err("summary"))?;

        Ok(output)
    }

    fn format_scan_summary(&self, scan: &ScanSummary, duplicates_skipped: usize) -> Result<String> {
        Ok(format!(
            "Scanned {} file(s): {} unreadable, {} malformed endpoint line(s), {} endpoint(s) found, {} duplicate(s) skipped",
            scan.files_scanned,
            scan.files_skipped,
            scan.malformed_lines,
            scan.endpoints_found,
            duplicates_skipped
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Endpoint, PingStats, ProbeFailure};
    use std::time::Duration;

    fn reachable(host: &str, source: &str, avg_ms: f64, loss_percent: f64) -> ProbeResult {
        ProbeResult::from_outcome(
            &Endpoint::new(host, source),
            Ok(PingStats {
                transmitted: 4,
                received: 4,
                loss_percent,
                min_ms: avg_ms,
                avg_ms,
                max_ms: avg_ms,
            }),
            Duration::ZERO,
        )
    }

    fn unreachable(host: &str, source: &str) -> ProbeResult {
        ProbeResult::unreachable(&Endpoint::new(host, source), ProbeFailure::TotalLoss, Duration::ZERO)
    }

    fn formatter(verbose: bool) -> PlainFormatter {
        PlainFormatter::new(FormattingOptions {
            enable_color: false,
            verbose_mode: verbose,
            table_borders: true,
        })
    }

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(Some(12.3456)), "12.35 ms");
        assert_eq!(format_latency(Some(0.4)), "0.40 ms");
        assert_eq!(format_latency(None), "-");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0), "0%");
        assert_eq!(format_percentage(25.0), "25.0%");
        assert_eq!(format_percentage(100.0), "100%");
    }

    #[test]
    fn test_align_text() {
        assert_eq!(align_text("ab", 4, &Alignment::Left), "ab  ");
        assert_eq!(align_text("ab", 4, &Alignment::Right), "  ab");
        assert_eq!(align_text("ab", 4, &Alignment::Center), " ab ");
        assert_eq!(align_text("abcdef", 3, &Alignment::Left), "abc");
    }

    #[test]
    fn test_table_has_one_line_per_result() {
        let results = vec![
            reachable("10.0.0.1", "/etc/wireguard/home.conf", 3.2, 0.0),
            unreachable("192.0.2.7", "/etc/wireguard/office.conf"),
        ];

        let table = formatter(false).format_results_table(&results).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        // border, header, border, two rows, border
        assert_eq!(lines.len(), 6);
        assert!(lines[3].contains("home.conf"));
        assert!(lines[3].contains("10.0.0.1"));
        assert!(lines[3].contains("3.20 ms"));
        assert!(lines[4].contains("unreachable"));
        assert!(lines[4].contains(" - "));
        assert!(lines[4].contains("100%"));
        assert!(lines.iter().all(|line| line.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn test_verbose_table_lists_failures() {
        let results = vec![unreachable("192.0.2.7", "a.conf")];
        let table = formatter(true).format_results_table(&results).unwrap();
        assert!(table.contains("192.0.2.7: 100% packet loss"));
    }

    #[test]
    fn test_summary_and_report() {
        let report = Report {
            results: vec![reachable("fast.example", "a.conf", 1.0, 0.0)],
            summary: ReportSummary {
                total: 1,
                reachable: 1,
                unreachable: 0,
                duplicates_skipped: 0,
                files_scanned: 1,
                files_skipped: 0,
                malformed_lines: 0,
                fastest: Some("fast.example".to_string()),
                total_duration: Duration::from_millis(2500),
            },
        };

        let output = formatter(false).format_report(&report).unwrap();
        assert!(output.contains("WireGuard Endpoint Latency"));
        assert!(output.contains("Fastest:      fast.example"));
        assert!(output.contains("Duration:     2.50s"));
    }

    #[test]
    fn test_scan_summary_line() {
        let scan = ScanSummary {
            files_scanned: 4,
            files_skipped: 1,
            malformed_lines: 2,
            endpoints_found: 9,
        };
        let line = formatter(false).format_scan_summary(&scan, 3).unwrap();
        assert_eq!(
            line,
            "Scanned 4 file(s): 1 unreadable, 2 malformed endpoint line(s), 9 endpoint(s) found, 3 duplicate(s) skipped"
        );
    }
}
