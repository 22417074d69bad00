//! Endpoint extraction from WireGuard configuration files
//!
//! Only `Endpoint = host:port` lines inside a `[Peer]` section are consumed.
//! Lines under `[Interface]`, any other section, or before the first section
//! header are ignored. Key and section names match case-insensitively.
//!
//! Host extraction per matched line:
//! 1. strip a trailing `#` or `;` comment and surrounding whitespace
//! 2. `[v6-literal]:port` yields the literal without brackets
//! 3. otherwise the rightmost `:port` is removed
//! 4. a host that still contains `:` (or is empty) is rejected

use crate::{
    logging::Logger,
    models::Endpoint,
};
use std::iter::Enumerate;
use std::path::PathBuf;
use std::str::Lines;
use thiserror::Error;

/// A matched `Endpoint` line whose value could not be turned into a host
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {reason} in endpoint '{value}'")]
pub struct MalformedEndpoint {
    /// 1-based line number
    pub line: usize,
    /// Value after comment stripping
    pub value: String,
    pub reason: &'static str,
}

/// Lazy iterator over the endpoint hosts declared in one config text
pub struct EndpointLines<'a> {
    lines: Enumerate<Lines<'a>>,
    in_peer: bool,
}

impl<'a> EndpointLines<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().enumerate(),
            in_peer: false,
        }
    }
}

impl Iterator for EndpointLines<'_> {
    type Item = Result<String, MalformedEndpoint>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, raw) in self.lines.by_ref() {
            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }

            if let Some(section) = section_name(line) {
                self.in_peer = section.eq_ignore_ascii_case("peer");
                continue;
            }

            if !self.in_peer {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if !key.trim().eq_ignore_ascii_case("endpoint") {
                continue;
            }

            let value = value.trim();
            return Some(parse_endpoint_host(value).map_err(|reason| MalformedEndpoint {
                line: index + 1,
                value: value.to_string(),
                reason,
            }));
        }
        None
    }
}

/// Iterate over the endpoint hosts in a config file's text
pub fn endpoint_hosts(content: &str) -> EndpointLines<'_> {
    EndpointLines::new(content)
}

/// Turn an endpoint value (`host:port`, `[v6]:port`, `host`) into a bare host
pub fn parse_endpoint_host(value: &str) -> Result<String, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty value");
    }

    if let Some(rest) = value.strip_prefix('[') {
        if let Some((literal, port)) = rest.split_once("]:") {
            if literal.is_empty() {
                return Err("empty IPv6 literal");
            }
            if literal.starts_with('-') {
                return Err("host starts with '-'");
            }
            if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
                return Err("invalid port after IPv6 literal");
            }
            return Ok(literal.to_string());
        }
    }

    let host = match value.rsplit_once(':') {
        Some((host, _port)) => host,
        None => value,
    };

    if host.contains(':') {
        return Err("residual colon after removing port");
    }

    let host = host.trim();
    if host.is_empty() {
        return Err("empty host");
    }

    // ping would read it as an option
    if host.starts_with('-') {
        return Err("host starts with '-'");
    }

    Ok(host.to_string())
}

fn strip_comment(line: &str) -> &str {
    let end = line.find(|c: char| c == '#' || c == ';').unwrap_or(line.len());
    line[..end].trim()
}

fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

/// Counters describing one scan over the config files
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ScanSummary {
    /// Files read successfully
    pub files_scanned: usize,
    /// Files that could not be read
    pub files_skipped: usize,
    /// Endpoint lines rejected as malformed
    pub malformed_lines: usize,
    /// Endpoints extracted, duplicates included
    pub endpoints_found: usize,
}

/// Reads config files and collects `(host, source)` pairs in scan order
pub struct EndpointExtractor {
    logger: Logger,
}

impl EndpointExtractor {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Extract endpoints from every file, in the order given.
    ///
    /// Unreadable files and malformed lines are logged and skipped.
    pub async fn scan(&self, files: &[PathBuf]) -> (Vec<Endpoint>, ScanSummary) {
        let mut endpoints = Vec::new();
        let mut summary = ScanSummary::default();

        for path in files {
            let content = match tokio::fs::read(path).await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    summary.files_skipped += 1;
                    self.logger.warn(&format!("Skipping unreadable file {}: {}", path.display(), e))
                        .field("path", path.display().to_string())
                        .log()
                        .await;
                    continue;
                }
            };
            summary.files_scanned += 1;

            let before = endpoints.len();
            for extracted in endpoint_hosts(&content) {
                match extracted {
                    Ok(host) => endpoints.push(Endpoint::new(host, path.clone())),
                    Err(malformed) => {
                        summary.malformed_lines += 1;
                        self.logger.warn(&format!("Skipping malformed endpoint in {}: {}", path.display(), malformed))
                            .field("path", path.display().to_string())
                            .field("line", malformed.line)
                            .log()
                            .await;
                    }
                }
            }

            crate::log_debug!(self.logger, "{} endpoint(s) in {}", endpoints.len() - before, path.display());
        }

        summary.endpoints_found = endpoints.len();
        (endpoints, summary)
    }
}
