//! # Weather Data Downloader Library
//!
//! A library for bulk-fetching date-indexed resources from an HTTP API.
//! Requests are issued concurrently in bounded fixed-size blocks, and failed
//! requests are retried with exponential backoff until they succeed or a
//! retry ceiling is reached.
//!
//! ## Features
//!
//! - **Bounded Concurrency**: Requests are partitioned into fixed-size blocks
//!   and each block is dispatched as one concurrent wave
//! - **Automatic Retry**: Failed requests are re-dispatched with exponential
//!   backoff, up to a configurable ceiling
//! - **Failures as Data**: Exhausted retries surface as residual `Failure`
//!   outcomes rather than errors; the caller decides what they mean
//! - **Pluggable Reporting**: Per-block and aggregate counters are delivered
//!   to a `Reporter` observer instead of being printed directly
//! - **Graceful Shutdown**: Ctrl+C aborts between blocks and interrupts
//!   backoff delays without losing already-collected outcomes
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use weather_data_downloader::downloader::{DownloadConfig, DownloadExecutor};
//! use weather_data_downloader::fetcher::HttpFetcher;
//! use weather_data_downloader::request::daily_descriptors;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // One descriptor per day of 2023
//! let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
//! let descriptors = daily_descriptors("https://example.com/weather", start, 365);
//!
//! // Fetch in blocks of 10 with up to 10 retry rounds per block
//! let fetcher = HttpFetcher::builder().header("api-key", "charlie")?.build()?;
//! let executor = DownloadExecutor::new(DownloadConfig::default());
//! let outcomes = executor.run(&fetcher, &descriptors).await?;
//!
//! let failures = outcomes.iter().filter(|o| !o.is_success()).count();
//! println!("{} of {} requests failed", failures, outcomes.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`request`] - Request descriptors and date-range URL construction
//! - [`fetcher`] - The [`fetcher::Fetch`] seam and the reqwest-backed
//!   [`fetcher::HttpFetcher`]
//! - [`downloader`] - Blocking, dispatch, retry, and orchestration
//! - [`cli`] - Command-line interface
//! - [`shutdown`] - Graceful shutdown coordination

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};

pub use request::RequestDescriptor;

/// CLI command implementations
pub mod cli;

/// Download orchestration
pub mod downloader;

/// Fetch trait and HTTP fetcher
pub mod fetcher;

/// Request descriptors and URL construction
pub mod request;

/// Graceful shutdown coordination shared across modules
pub mod shutdown;

/// An HTTP response reduced to the parts the engine cares about: a status
/// code and the body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl FetchResponse {
    /// Create a response from a status code and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status code is in the conventional 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a request is considered failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchFailure {
    /// The server answered with a non-2xx status.
    Http(FetchResponse),
    /// The request never produced a response (connection refused, timeout,
    /// DNS failure).
    Transport(String),
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Http(response) => write!(f, "HTTP status {}", response.status),
            FetchFailure::Transport(message) => write!(f, "transport error: {message}"),
        }
    }
}

/// The result of attempting one request. The descriptor is carried in both
/// variants so the failed subset can be re-dispatched without re-deriving
/// the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The request completed with a 2xx status.
    Success {
        /// The request that produced this outcome
        descriptor: RequestDescriptor,
        /// The successful response
        response: FetchResponse,
    },
    /// The request failed, either with a non-2xx status or a transport error.
    Failure {
        /// The request that produced this outcome
        descriptor: RequestDescriptor,
        /// What went wrong
        failure: FetchFailure,
    },
}

impl Outcome {
    /// The descriptor this outcome belongs to.
    pub fn descriptor(&self) -> &RequestDescriptor {
        match self {
            Outcome::Success { descriptor, .. } => descriptor,
            Outcome::Failure { descriptor, .. } => descriptor,
        }
    }

    /// Consume the outcome, keeping only its descriptor.
    pub fn into_descriptor(self) -> RequestDescriptor {
        match self {
            Outcome::Success { descriptor, .. } => descriptor,
            Outcome::Failure { descriptor, .. } => descriptor,
        }
    }

    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// The response body, if any was received. Transport failures carry no
    /// body.
    pub fn body(&self) -> Option<&str> {
        match self {
            Outcome::Success { response, .. } => Some(&response.body),
            Outcome::Failure {
                failure: FetchFailure::Http(response),
                ..
            } => Some(&response.body),
            Outcome::Failure { .. } => None,
        }
    }

    /// The HTTP status code, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Success { response, .. } => Some(response.status),
            Outcome::Failure {
                failure: FetchFailure::Http(response),
                ..
            } => Some(response.status),
            Outcome::Failure { .. } => None,
        }
    }
}
