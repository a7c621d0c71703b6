//! Download configuration and backoff calculation.

use std::time::Duration;

use crate::downloader::DownloadError;

/// Default number of requests dispatched concurrently per block.
pub const DEFAULT_BLOCK_SIZE: usize = 10;

/// Default retry ceiling. After this many retry rounds, remaining failures
/// are accepted as terminal rather than retried forever.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Default exponential backoff base in seconds. Round N waits
/// `base ^ N` seconds, so attempts 0, 1, 2, ... wait 1s, 2s, 4s, ...
pub const DEFAULT_BACKOFF_BASE_SECS: u64 = 2;

/// Default cap on a single backoff delay. Keeps late retry rounds from
/// stalling a block for many minutes.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(300);

/// Tunable policy for one download run.
///
/// The retry ceiling and backoff formula are deliberately configuration, not
/// compile-time constants, so callers can tighten them in tests and loosen
/// them against flaky endpoints.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Number of requests dispatched concurrently per block. Must be >= 1.
    pub block_size: usize,
    /// Maximum number of retry rounds before residual failures are accepted.
    pub max_retries: u32,
    /// Exponential backoff base in seconds. Must be >= 1.
    pub backoff_base_secs: u64,
    /// Cap on any single backoff delay.
    pub max_backoff: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_secs: DEFAULT_BACKOFF_BASE_SECS,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

impl DownloadConfig {
    /// Fail fast on configurations that violate engine preconditions.
    pub fn validate(&self) -> Result<(), DownloadError> {
        if self.block_size == 0 {
            return Err(DownloadError::InvalidConfig(
                "block size must be at least 1".to_string(),
            ));
        }
        if self.backoff_base_secs == 0 {
            return Err(DownloadError::InvalidConfig(
                "backoff base must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Delay before the retry round following `attempt`: `base ^ attempt`
    /// seconds, capped at [`DownloadConfig::max_backoff`]. Non-decreasing in
    /// the attempt count.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let secs = self.backoff_base_secs.saturating_pow(attempt);
        Duration::from_secs(secs).min(self.max_backoff)
    }
}
