//! Ordering and summarising probe results

use crate::{
    executor::ScheduleOutcome,
    extractor::ScanSummary,
    models::ProbeResult,
};
use serde::Serialize;
use std::time::Duration;

/// Sort ascending by average latency, unreachable last.
///
/// The sort is stable, so equal latencies and all unreachable results keep
/// their input order.
pub fn sort_results(results: &mut [ProbeResult]) {
    results.sort_by(ProbeResult::cmp_latency);
}

/// Totals shown under the result table
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Unique endpoints probed
    pub total: usize,
    pub reachable: usize,
    pub unreachable: usize,
    pub duplicates_skipped: usize,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub malformed_lines: usize,
    /// Host with the lowest average latency
    pub fastest: Option<String>,
    pub total_duration: Duration,
}

/// Sorted results plus their summary
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub results: Vec<ProbeResult>,
    pub summary: ReportSummary,
}

impl Report {
    /// Build a report from a finished run and the scan that fed it
    pub fn new(outcome: ScheduleOutcome, scan: &ScanSummary) -> Self {
        let ScheduleOutcome {
            mut results,
            duplicates_skipped,
            elapsed,
        } = outcome;

        sort_results(&mut results);

        let reachable = results.iter().filter(|r| r.reachable).count();
        let fastest = results.first()
            .filter(|r| r.reachable)
            .map(|r| r.host.clone());

        let summary = ReportSummary {
            total: results.len(),
            reachable,
            unreachable: results.len() - reachable,
            duplicates_skipped,
            files_scanned: scan.files_scanned,
            files_skipped: scan.files_skipped,
            malformed_lines: scan.malformed_lines,
            fastest,
            total_duration: elapsed,
        };

        Self { results, summary }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
