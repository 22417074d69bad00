//! Parsing of `ping` summary output
//!
//! Understands iputils and busybox (`rtt` / `round-trip` lines), macOS and
//! the BSDs (`round-trip ... stddev`), and Windows (`Minimum = ..ms`).

use crate::{
    models::{PingStats, ProbeFailure},
    probe::ProbeOutcome,
};
use regex::Regex;
use std::sync::OnceLock;

struct SummaryPatterns {
    unix_rtt: Regex,
    windows_rtt: Regex,
    unix_counts: Regex,
    windows_counts: Regex,
    loss: Regex,
}

fn patterns() -> &'static SummaryPatterns {
    static PATTERNS: OnceLock<SummaryPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SummaryPatterns {
        unix_rtt: Regex::new(
            r"(?:rtt|round-trip) min/avg/max(?:/(?:mdev|stddev))? = ([\d.]+)/([\d.]+)/([\d.]+)",
        )
        .expect("valid rtt pattern"),
        windows_rtt: Regex::new(r"Minimum = (\d+)ms, Maximum = (\d+)ms, Average = (\d+)ms")
            .expect("valid windows rtt pattern"),
        unix_counts: Regex::new(r"(\d+) packets transmitted, (\d+) (?:packets )?received")
            .expect("valid counts pattern"),
        windows_counts: Regex::new(r"Sent = (\d+), Received = (\d+)")
            .expect("valid windows counts pattern"),
        loss: Regex::new(r"([\d.]+)% (?:packet )?loss").expect("valid loss pattern"),
    })
}

/// Extract round-trip statistics from a ping run's stdout.
///
/// No round-trip line with zero replies (or 100% loss) is `TotalLoss`;
/// no round-trip line otherwise is `Unparseable`.
pub fn parse_ping_output(output: &str) -> ProbeOutcome {
    let patterns = patterns();

    let counts = patterns.unix_counts.captures(output)
        .or_else(|| patterns.windows_counts.captures(output))
        .and_then(|caps| {
            let transmitted = caps.get(1)?.as_str().parse::<u32>().ok()?;
            let received = caps.get(2)?.as_str().parse::<u32>().ok()?;
            Some((transmitted, received))
        });

    let loss_percent = patterns.loss.captures(output)
        .and_then(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .or_else(|| counts.map(|(sent, received)| loss_from_counts(sent, received)));

    let rtt = patterns.unix_rtt.captures(output)
        .map(|caps| (caps.get(1), caps.get(2), caps.get(3)))
        .or_else(|| {
            // Windows prints Minimum, Maximum, Average in that order
            patterns.windows_rtt.captures(output).map(|caps| (caps.get(1), caps.get(3), caps.get(2)))
        })
        .and_then(|(min, avg, max)| {
            Some((
                min?.as_str().parse::<f64>().ok()?,
                avg?.as_str().parse::<f64>().ok()?,
                max?.as_str().parse::<f64>().ok()?,
            ))
        });

    match rtt {
        Some((min_ms, avg_ms, max_ms)) => {
            let (transmitted, received) = counts.unwrap_or((0, 0));
            Ok(PingStats {
                transmitted,
                received,
                loss_percent: loss_percent.unwrap_or(0.0),
                min_ms,
                avg_ms,
                max_ms,
            })
        }
        None => {
            let no_replies = matches!(counts, Some((_, 0)))
                || loss_percent.map(|loss| loss >= 100.0).unwrap_or(false);
            if no_replies {
                Err(ProbeFailure::TotalLoss)
            } else {
                Err(ProbeFailure::Unparseable)
            }
        }
    }
}

fn loss_from_counts(transmitted: u32, received: u32) -> f64 {
    if transmitted == 0 {
        return 100.0;
    }
    let lost = transmitted.saturating_sub(received) as f64;
    lost * 100.0 / transmitted as f64
}
