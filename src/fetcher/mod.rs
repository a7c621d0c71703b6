//! The fetch seam between the download engine and the HTTP transport.
//!
//! The engine only ever talks to a [`Fetch`] implementation, so tests can
//! substitute a scripted fetcher and the production binary plugs in the
//! reqwest-backed [`HttpFetcher`].

use async_trait::async_trait;

use crate::{FetchResponse, RequestDescriptor};

pub mod http;

pub use http::{HttpFetcher, HttpFetcherBuilder};

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// The request never reached the server or the response never arrived
    /// (connection refused, timeout, DNS failure).
    #[error("network error: {0}")]
    Network(String),

    /// The fetcher could not be constructed (bad header, client build
    /// failure).
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// One HTTP GET per descriptor.
///
/// Implementations return `Ok` for every response that arrives, whatever its
/// status code; classification into success and failure happens in the
/// dispatcher. Only transport-level problems surface as `Err`.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issue a single GET for the descriptor's URL.
    async fn fetch(&self, descriptor: &RequestDescriptor) -> FetcherResult<FetchResponse>;
}
