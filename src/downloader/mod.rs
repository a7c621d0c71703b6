//! Download orchestration: blocking, concurrent dispatch, retry, reporting.
//!
//! # Overview
//!
//! The engine processes a descriptor list in four stages:
//!
//! 1. **Blocking**: [`block::partition`] splits the list into fixed-size
//!    contiguous blocks to bound concurrency per wave
//! 2. **Dispatch**: [`dispatch::dispatch_all`] issues every request in a
//!    block concurrently and waits for the whole wave to finish
//! 3. **Retry**: [`retry::retry_failed`] re-dispatches the failed subset
//!    with exponential backoff until everything succeeds or the retry
//!    ceiling is reached
//! 4. **Orchestration**: [`executor::DownloadExecutor`] drives the blocks in
//!    strict sequence, accumulates outcomes, and feeds per-block and
//!    aggregate counters to a [`report::Reporter`]
//!
//! Blocks are processed one at a time: block N+1 does not start until block
//! N, including all of its retries, is fully resolved. Within a block no
//! completion order is guaranteed, but every descriptor's outcome is
//! preserved regardless.
//!
//! # Error Handling
//!
//! Ordinary HTTP and transport failures are never errors here; they are
//! [`crate::Outcome::Failure`] values that flow through the retry path and,
//! if the ceiling is reached, into the final outcome list. Only contract
//! violations (invalid configuration) and shutdown surface as
//! [`DownloadError`].

pub mod block;
pub mod config;
pub mod dispatch;
pub mod executor;
pub mod report;
pub mod retry;

pub use config::DownloadConfig;
pub use executor::DownloadExecutor;
pub use report::{BlockReport, Reporter, RunSummary, TracingReporter};

/// Download errors
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The configuration violates a precondition (zero block size, zero
    /// backoff base).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Shutdown was requested between blocks; the run stopped early.
    #[error("download cancelled by shutdown request")]
    Cancelled,
}
