//! Machine-readable JSON output

use crate::{
    error::Result,
    extractor::ScanSummary,
    models::ProbeResult,
    report::{Report, ReportSummary},
};
use super::formatter::OutputFormatter;
use serde_json::json;

/// Emits the report as one pretty-printed JSON document
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_header(&self, _title: &str) -> Result<String> {
        Ok(String::new())
    }

    fn format_results_table(&self, results: &[ProbeResult]) -> Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }

    fn format_summary(&self, summary: &ReportSummary) -> Result<String> {
        Ok(serde_json::to_string_pretty(summary)?)
    }

    fn format_scan_summary(&self, scan: &ScanSummary, duplicates_skipped: usize) -> Result<String> {
        Ok(json!({ "scan": scan, "duplicates_skipped": duplicates_skipped }).to_string())
    }

    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Endpoint, ProbeFailure};
    use serde_json::Value;
    use std::time::Duration;

    #[test]
    fn test_report_document_shape() {
        let report = Report {
            results: vec![ProbeResult::unreachable(
                &Endpoint::new("192.0.2.1", "/etc/wireguard/lab.conf"),
                ProbeFailure::TotalLoss,
                Duration::ZERO,
            )],
            summary: ReportSummary {
                total: 1,
                reachable: 0,
                unreachable: 1,
                duplicates_skipped: 0,
                files_scanned: 1,
                files_skipped: 0,
                malformed_lines: 0,
                fastest: None,
                total_duration: Duration::from_secs(1),
            },
        };

        let output = JsonFormatter::new().format_report(&report).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["results"][0]["host"], "192.0.2.1");
        assert_eq!(value["results"][0]["reachable"], false);
        assert!(value["results"][0]["average_latency_ms"].is_null());
        assert_eq!(value["results"][0]["failure"]["kind"], "total_loss");
        assert_eq!(value["summary"]["unreachable"], 1);
        assert!(value["summary"]["fastest"].is_null());
    }
}
