//! Request descriptors and date-range URL construction.
//!
//! A [`RequestDescriptor`] is the opaque unit of request identity the engine
//! works with: a target URL, created once and never mutated. The only
//! descriptor-list builder shipped here is [`daily_descriptors`], which
//! produces one URL per calendar day in the `{base}/{YYYY-MM-DD}` shape the
//! weather API serves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An opaque identifier for one HTTP GET: the target URL.
///
/// Descriptors are value-like and freely cloneable; the dispatch and retry
/// machinery carries them alongside every outcome so the failed subset can be
/// re-issued without re-deriving the request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestDescriptor {
    url: String,
}

impl RequestDescriptor {
    /// Create a descriptor for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Build one descriptor per calendar day, starting at `start` and counting
/// `days` consecutive days. URLs take the form `{base_url}/{YYYY-MM-DD}`;
/// a trailing slash on `base_url` is tolerated.
pub fn daily_descriptors(base_url: &str, start: NaiveDate, days: u32) -> Vec<RequestDescriptor> {
    let base = base_url.trim_end_matches('/');
    (0..days)
        .map(|offset| {
            let date = start + chrono::Duration::days(i64::from(offset));
            RequestDescriptor::new(format!("{base}/{}", date.format("%Y-%m-%d")))
        })
        .collect()
}
