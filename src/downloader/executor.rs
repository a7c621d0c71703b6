//! Download executor: drives blocks in sequence and accumulates outcomes.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::downloader::block::partition;
use crate::downloader::config::DownloadConfig;
use crate::downloader::dispatch::{dispatch_all, split_outcomes};
use crate::downloader::report::{BlockReport, Reporter, RunSummary, TracingReporter};
use crate::downloader::retry::retry_failed;
use crate::downloader::DownloadError;
use crate::fetcher::Fetch;
use crate::shutdown::{self, SharedShutdown};
use crate::{Outcome, RequestDescriptor};

/// Orchestrates a full download run.
///
/// Blocks are processed strictly in sequence: each block is dispatched as
/// one concurrent wave, its failures go through the retry path, and only
/// once the block is fully resolved does the next one start. The executor
/// always returns one outcome per descriptor in the expected-failure path;
/// residual failures after the retry ceiling are data in the result, not
/// errors.
pub struct DownloadExecutor {
    config: DownloadConfig,
    reporter: Arc<dyn Reporter>,
    shutdown: Option<SharedShutdown>,
}

impl DownloadExecutor {
    /// Create an executor with the given configuration, logging reports via
    /// tracing and picking up the global shutdown handle if one is
    /// installed.
    pub fn new(config: DownloadConfig) -> Self {
        Self {
            config,
            reporter: Arc::new(TracingReporter),
            shutdown: shutdown::get_global_shutdown(),
        }
    }

    /// Replace the reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Attach a shared shutdown handle for graceful cancellation.
    pub fn with_shutdown(mut self, shutdown: SharedShutdown) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .map(|s| s.is_shutdown_requested())
            .unwrap_or(false)
    }

    /// Run the full sequence: partition, then per block dispatch, retry, and
    /// accumulate. Returns one outcome per input descriptor.
    ///
    /// An empty descriptor list completes immediately with an empty outcome
    /// list and zero network calls. Shutdown between blocks aborts the run
    /// with [`DownloadError::Cancelled`].
    pub async fn run(
        &self,
        fetcher: &dyn Fetch,
        descriptors: &[RequestDescriptor],
    ) -> Result<Vec<Outcome>, DownloadError> {
        self.config.validate()?;

        let run_start = Instant::now();
        let blocks = partition(descriptors, self.config.block_size);

        info!(
            requests = descriptors.len(),
            blocks = blocks.len(),
            block_size = self.config.block_size,
            "starting download run"
        );

        let mut all_outcomes: Vec<Outcome> = Vec::with_capacity(descriptors.len());

        for (index, block) in blocks.iter().enumerate() {
            if self.shutdown_requested() {
                info!(block = index, "shutdown requested - stopping before block");
                return Err(DownloadError::Cancelled);
            }

            let span = tracing::info_span!("block", index, size = block.len());
            let _enter = span.enter();

            let block_start = Instant::now();

            let outcomes = dispatch_all(fetcher, block).await;
            let (successes, failures) = split_outcomes(outcomes);
            let retried =
                retry_failed(fetcher, failures, &self.config, self.shutdown.as_ref()).await;

            // Final-outcome tally: each descriptor counted once
            let recovered = retried.outcomes.iter().filter(|o| o.is_success()).count();
            let success_count = successes.len() + recovered;
            let report = BlockReport {
                index,
                requested: block.len(),
                successes: success_count,
                failures: block.len() - success_count,
                retry_rounds: retried.rounds,
                elapsed: block_start.elapsed(),
            };
            self.reporter.block_complete(&report);

            all_outcomes.extend(successes);
            all_outcomes.extend(retried.outcomes);
        }

        let success_count = all_outcomes.iter().filter(|o| o.is_success()).count();
        let summary = RunSummary {
            blocks: blocks.len(),
            requested: descriptors.len(),
            successes: success_count,
            failures: all_outcomes.len() - success_count,
            elapsed: run_start.elapsed(),
        };
        self.reporter.run_complete(&summary);

        Ok(all_outcomes)
    }
}
