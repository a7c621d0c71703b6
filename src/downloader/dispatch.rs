//! Concurrent dispatch of one block of requests.

use futures_util::future;
use tracing::debug;

use crate::fetcher::Fetch;
use crate::{FetchFailure, Outcome, RequestDescriptor};

/// Issue every descriptor's GET concurrently and wait for the whole wave to
/// finish. Returns exactly one [`Outcome`] per input descriptor; identical
/// descriptors are fetched once each, not deduplicated.
///
/// Classification follows HTTP status semantics: 2xx responses are
/// `Success`, any other status is a `Failure` carrying the response, and
/// transport errors (connection refused, timeout, DNS) are `Failure`s
/// carrying the error message.
pub async fn dispatch_all(fetcher: &dyn Fetch, descriptors: &[RequestDescriptor]) -> Vec<Outcome> {
    debug!(requests = descriptors.len(), "dispatching wave");

    let requests = descriptors.iter().map(|descriptor| async move {
        match fetcher.fetch(descriptor).await {
            Ok(response) if response.is_success() => Outcome::Success {
                descriptor: descriptor.clone(),
                response,
            },
            Ok(response) => Outcome::Failure {
                descriptor: descriptor.clone(),
                failure: FetchFailure::Http(response),
            },
            Err(error) => Outcome::Failure {
                descriptor: descriptor.clone(),
                failure: FetchFailure::Transport(error.to_string()),
            },
        }
    });

    future::join_all(requests).await
}

/// Partition outcomes into (successes, failures), preserving relative order
/// within each side.
pub fn split_outcomes(outcomes: Vec<Outcome>) -> (Vec<Outcome>, Vec<Outcome>) {
    outcomes.into_iter().partition(Outcome::is_success)
}
