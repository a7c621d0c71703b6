//! Pluggable reporting of per-block and aggregate download statistics.
//!
//! The executor never prints anything itself; it hands counters to a
//! [`Reporter`] after each block and once at the end of the run. The default
//! [`TracingReporter`] forwards them to the log, and tests substitute a
//! capturing implementation.
//!
//! Tallying rule: each descriptor is counted exactly once, by its final
//! outcome. A descriptor that fails three rounds and then succeeds is one
//! success, not three failures and a success.

use std::time::Duration;

use tracing::info;

/// Statistics for one fully-resolved block, retries included.
#[derive(Debug, Clone)]
pub struct BlockReport {
    /// Zero-based block index in dispatch order.
    pub index: usize,
    /// Number of descriptors in the block.
    pub requested: usize,
    /// Descriptors whose final outcome is a success.
    pub successes: usize,
    /// Descriptors still failing after the retry ceiling.
    pub failures: usize,
    /// Dispatch rounds spent in retry for this block (zero when the first
    /// wave fully succeeded).
    pub retry_rounds: u32,
    /// Wall-clock time to resolve the block, retries and backoff included.
    pub elapsed: Duration,
}

/// Aggregate statistics for a whole run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of blocks processed.
    pub blocks: usize,
    /// Total descriptors requested.
    pub requested: usize,
    /// Descriptors whose final outcome is a success.
    pub successes: usize,
    /// Descriptors still failing after all retries.
    pub failures: usize,
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
}

/// Observer invoked by the executor after each block and at the end of the
/// run.
pub trait Reporter: Send + Sync {
    /// Called once per block, after its retries are fully resolved.
    fn block_complete(&self, report: &BlockReport);

    /// Called once when the run finishes.
    fn run_complete(&self, summary: &RunSummary);
}

/// Default reporter: emits block and run statistics to the log.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn block_complete(&self, report: &BlockReport) {
        let elapsed_secs = report.elapsed.as_secs_f64();
        let average_secs = if report.requested > 0 {
            elapsed_secs / report.requested as f64
        } else {
            0.0
        };
        info!(
            block = report.index,
            requested = report.requested,
            successes = report.successes,
            failures = report.failures,
            retry_rounds = report.retry_rounds,
            elapsed_secs,
            average_secs,
            "block complete"
        );
    }

    fn run_complete(&self, summary: &RunSummary) {
        info!(
            blocks = summary.blocks,
            requested = summary.requested,
            successes = summary.successes,
            failures = summary.failures,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "run complete"
        );
    }
}
