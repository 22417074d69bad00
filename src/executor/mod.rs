//! Probe execution engine
//!
//! Deduplicates the extracted endpoints and probes each unique host with a
//! bounded number of probes in flight. Every spawned task owns its result and
//! hands it back through its `JoinHandle`, so nothing is shared but the
//! semaphore.

use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::{Config, Endpoint, ProbeFailure, ProbeResult},
    probe::Prober,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::{sync::Semaphore, time::timeout};

/// Execution parameters for a probe run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Echo requests per endpoint
    pub ping_count: u32,
    /// Hard upper bound on each probe
    pub timeout: Duration,
    /// Maximum probes in flight
    pub concurrency: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            ping_count: crate::defaults::DEFAULT_PING_COUNT,
            timeout: crate::defaults::DEFAULT_TIMEOUT,
            concurrency: crate::defaults::DEFAULT_CONCURRENCY,
        }
    }
}

impl From<&Config> for SchedulerConfig {
    fn from(config: &Config) -> Self {
        Self {
            ping_count: config.ping_count,
            timeout: config.timeout(),
            concurrency: config.concurrency,
        }
    }
}

/// Everything a probe run produced
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// One result per unique host, in launch order
    pub results: Vec<ProbeResult>,
    /// Endpoints dropped because their host was already scheduled
    pub duplicates_skipped: usize,
    /// Wall-clock time of the whole run
    pub elapsed: Duration,
}

/// Keep the first occurrence of every host, in first-seen order.
///
/// Returns the unique endpoints and how many duplicates were dropped.
pub fn dedup_endpoints(endpoints: Vec<Endpoint>) -> (Vec<Endpoint>, usize) {
    let total = endpoints.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Endpoint> = endpoints
        .into_iter()
        .filter(|endpoint| seen.insert(endpoint.host.clone()))
        .collect();
    let duplicates = total - unique.len();
    (unique, duplicates)
}

/// Runs probes for a set of endpoints with bounded concurrency
pub struct ProbeScheduler {
    prober: Arc<dyn Prober>,
    config: SchedulerConfig,
    logger: Logger,
}

impl ProbeScheduler {
    pub fn new(prober: Arc<dyn Prober>, config: SchedulerConfig, logger: Logger) -> Self {
        Self { prober, config, logger }
    }

    /// Probe every unique host and return one result per host.
    ///
    /// Probes launch in first-seen order; a launch waits for a free permit
    /// once `concurrency` probes are in flight. A probe that fails, times out
    /// or panics is recorded as unreachable and never affects the others.
    pub async fn run(&self, endpoints: Vec<Endpoint>) -> Result<ScheduleOutcome> {
        let started = Instant::now();
        let (unique, duplicates_skipped) = dedup_endpoints(endpoints);

        if duplicates_skipped > 0 {
            crate::log_info!(self.logger, "Skipped {} duplicate endpoint(s)", duplicates_skipped);
        }

        self.logger.info(&format!("Probing {} unique endpoint(s)", unique.len()))
            .field("ping_count", self.config.ping_count)
            .field("timeout_secs", self.config.timeout.as_secs_f64())
            .field("concurrency", self.config.concurrency)
            .field("prober", self.prober.name())
            .log()
            .await;

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut handles = Vec::with_capacity(unique.len());

        for endpoint in &unique {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| AppError::internal(format!("Probe limiter closed: {}", e)))?;

            let prober = Arc::clone(&self.prober);
            let endpoint = endpoint.clone();
            let count = self.config.ping_count;
            let deadline = self.config.timeout;

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                let launched = Instant::now();
                let family = endpoint.family();

                let outcome = match timeout(deadline, prober.probe(&endpoint.host, count, deadline, family)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(ProbeFailure::Timeout(deadline)),
                };

                ProbeResult::from_outcome(&endpoint, outcome, launched.elapsed())
            }));
        }

        let joined = join_all(handles).await;

        let mut results = Vec::with_capacity(joined.len());
        for (endpoint, joined) in unique.iter().zip(joined) {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    self.logger.warn(&format!("Probe task for {} failed: {}", endpoint.host, e))
                        .field("host", &endpoint.host)
                        .log()
                        .await;
                    ProbeResult::unreachable(endpoint, ProbeFailure::Aborted(e.to_string()), Duration::ZERO)
                }
            };

            self.logger.debug("Probe finished")
                .correlation_id(&result.host)
                .probe(&result)
                .log()
                .await;

            results.push(result);
        }

        Ok(ScheduleOutcome {
            results,
            duplicates_skipped,
            elapsed: started.elapsed(),
        })
    }
}
