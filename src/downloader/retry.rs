//! Retry of failed requests with exponential backoff.

use tracing::{debug, info, warn};

use crate::downloader::config::DownloadConfig;
use crate::downloader::dispatch::{dispatch_all, split_outcomes};
use crate::fetcher::Fetch;
use crate::shutdown::SharedShutdown;
use crate::{Outcome, RequestDescriptor};

/// What a retry run produced: the final outcome for every descriptor that
/// entered, plus the number of dispatch rounds it took.
#[derive(Debug)]
pub struct RetryResult {
    /// One final outcome per originally-failed descriptor. Descriptors that
    /// recovered appear as `Success`; descriptors still failing at the
    /// ceiling appear as `Failure`.
    pub outcomes: Vec<Outcome>,
    /// Number of dispatch rounds executed. Zero when the input was empty;
    /// at most `max_retries + 1` otherwise.
    pub rounds: u32,
}

/// Re-dispatch the descriptors behind `failed` until every one succeeds or
/// the retry ceiling is reached.
///
/// Rounds run as full concurrent waves over the still-failing subset, with
/// an exponentially growing delay between rounds. The whole retry step
/// suspends during backoff; no other work proceeds. An empty input returns
/// immediately with no network call and no delay.
///
/// Reaching the ceiling is a deliberate give-up, not an error: the residual
/// failures come back tagged as `Failure` outcomes for the caller to report.
/// If `shutdown` fires during a backoff delay, the pending failures are
/// likewise surfaced as residuals and retrying stops.
pub async fn retry_failed(
    fetcher: &dyn Fetch,
    failed: Vec<Outcome>,
    config: &DownloadConfig,
    shutdown: Option<&SharedShutdown>,
) -> RetryResult {
    let mut resolved = Vec::with_capacity(failed.len());
    let mut pending: Vec<RequestDescriptor> =
        failed.into_iter().map(Outcome::into_descriptor).collect();

    if pending.is_empty() {
        return RetryResult {
            outcomes: resolved,
            rounds: 0,
        };
    }

    let mut attempt: u32 = 0;
    let mut rounds: u32 = 0;

    loop {
        debug!(
            attempt,
            urls = %format_urls(&pending),
            "retrying failed requests"
        );

        let outcomes = dispatch_all(fetcher, &pending).await;
        rounds += 1;

        let (recovered, still_failing) = split_outcomes(outcomes);
        resolved.extend(recovered);

        if still_failing.is_empty() {
            info!(attempt, "all failed requests recovered");
            break;
        }

        if attempt >= config.max_retries {
            warn!(
                attempt,
                residual = still_failing.len(),
                "retry ceiling reached; accepting residual failures"
            );
            resolved.extend(still_failing);
            break;
        }

        let backoff = config.backoff_delay(attempt);
        info!(
            attempt,
            still_failing = still_failing.len(),
            backoff_secs = backoff.as_secs_f64(),
            "delaying before next retry round"
        );

        let cancelled = match shutdown {
            Some(shutdown) => tokio::select! {
                _ = tokio::time::sleep(backoff) => false,
                _ = shutdown.wait_for_shutdown() => true,
            },
            None => {
                tokio::time::sleep(backoff).await;
                false
            }
        };
        if cancelled {
            warn!(
                residual = still_failing.len(),
                "shutdown requested during backoff; accepting residual failures"
            );
            resolved.extend(still_failing);
            break;
        }

        attempt += 1;
        pending = still_failing
            .into_iter()
            .map(Outcome::into_descriptor)
            .collect();
    }

    RetryResult {
        outcomes: resolved,
        rounds,
    }
}

fn format_urls(descriptors: &[RequestDescriptor]) -> String {
    descriptors
        .iter()
        .map(RequestDescriptor::url)
        .collect::<Vec<_>>()
        .join(", ")
}
