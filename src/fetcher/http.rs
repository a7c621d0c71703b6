//! Reqwest-backed fetcher.
//!
//! A thin wrapper around a shared [`reqwest::Client`]: fixed headers (the
//! API credential) are attached as default headers at build time, and an
//! optional per-request timeout bounds how long any single GET may hang.
//! The connection pool inside the client is the only resource shared across
//! concurrent dispatches.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::fetcher::{Fetch, FetcherError, FetcherResult};
use crate::{FetchResponse, RequestDescriptor};

/// HTTP fetcher backed by a shared reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Start building a fetcher.
    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::default()
    }

    /// Create a fetcher with no default headers and no request timeout.
    pub fn new() -> FetcherResult<Self> {
        Self::builder().build()
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, descriptor: &RequestDescriptor) -> FetcherResult<FetchResponse> {
        debug!(url = %descriptor, "issuing GET");

        let response = self
            .client
            .get(descriptor.url())
            .send()
            .await
            .map_err(|e| FetcherError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetcherError::Network(e.to_string()))?;

        Ok(FetchResponse::new(status, body))
    }
}

/// Builder for [`HttpFetcher`].
#[derive(Default)]
pub struct HttpFetcherBuilder {
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl HttpFetcherBuilder {
    /// Attach a header to every request (e.g. the `api-key` credential).
    pub fn header(mut self, name: &str, value: &str) -> FetcherResult<Self> {
        let name = HeaderName::try_from(name)
            .map_err(|e| FetcherError::Configuration(format!("invalid header name: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| FetcherError::Configuration(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Bound how long any single request may take, end to end. Requests that
    /// exceed the timeout surface as transport failures and go through the
    /// normal retry path.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the fetcher.
    pub fn build(self) -> FetcherResult<HttpFetcher> {
        let mut builder = Client::builder().default_headers(self.headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetcherError::Configuration(format!("failed to build client: {e}")))?;

        Ok(HttpFetcher { client })
    }
}
