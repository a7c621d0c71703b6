//! Retry loop behavior: base case, recovery, ceiling, backoff timing.
//!
//! These tests run on a paused tokio clock, so backoff delays elapse
//! instantly in wall time while remaining observable through
//! `tokio::time::Instant`.

use std::time::Duration;

use weather_data_downloader::downloader::retry::retry_failed;
use weather_data_downloader::downloader::DownloadConfig;

use crate::support::{failure_outcome, MockFetcher, Scripted};

fn config(max_retries: u32) -> DownloadConfig {
    DownloadConfig {
        max_retries,
        ..DownloadConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_empty_input_returns_immediately() {
    let fetcher = MockFetcher::new();
    let started = tokio::time::Instant::now();

    let result = retry_failed(&fetcher, vec![], &config(10), None).await;

    assert!(result.outcomes.is_empty());
    assert_eq!(result.rounds, 0);
    assert_eq!(fetcher.calls(), 0);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_all_recover_on_first_round_without_delay() {
    let fetcher = MockFetcher::new()
        .script("https://example.com/a", vec![Scripted::Status(200)])
        .script("https://example.com/b", vec![Scripted::Status(200)]);
    let failed = vec![
        failure_outcome("https://example.com/a"),
        failure_outcome("https://example.com/b"),
    ];
    let started = tokio::time::Instant::now();

    let result = retry_failed(&fetcher, failed, &config(10), None).await;

    assert_eq!(result.rounds, 1);
    assert_eq!(result.outcomes.len(), 2);
    assert!(result.outcomes.iter().all(|o| o.is_success()));
    assert_eq!(fetcher.calls(), 2);
    // Recovery on the first round never waits out a backoff
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_ceiling_yields_residual_failure() {
    let fetcher =
        MockFetcher::new().script("https://example.com/a", vec![Scripted::Status(500)]);
    let failed = vec![failure_outcome("https://example.com/a")];

    let result = retry_failed(&fetcher, failed, &config(3), None).await;

    // max_retries + 1 dispatch rounds, then give up
    assert_eq!(result.rounds, 4);
    assert_eq!(fetcher.calls(), 4);
    assert_eq!(result.outcomes.len(), 1);
    assert!(!result.outcomes[0].is_success());
}

#[tokio::test(start_paused = true)]
async fn test_backoff_delays_grow_exponentially() {
    let fetcher =
        MockFetcher::new().script("https://example.com/a", vec![Scripted::Status(500)]);
    let failed = vec![failure_outcome("https://example.com/a")];
    let started = tokio::time::Instant::now();

    let result = retry_failed(&fetcher, failed, &config(3), None).await;

    assert_eq!(result.rounds, 4);
    // Three delayed rounds at 2^0, 2^1, 2^2 seconds
    assert_eq!(started.elapsed(), Duration::from_secs(1 + 2 + 4));
}

#[tokio::test(start_paused = true)]
async fn test_mixed_recovery_preserves_every_descriptor() {
    // `a` recovers on the third round, `b` never does
    let fetcher = MockFetcher::new()
        .script(
            "https://example.com/a",
            vec![
                Scripted::Status(500),
                Scripted::Transport,
                Scripted::Status(200),
            ],
        )
        .script("https://example.com/b", vec![Scripted::Status(500)]);
    let failed = vec![
        failure_outcome("https://example.com/a"),
        failure_outcome("https://example.com/b"),
    ];

    let result = retry_failed(&fetcher, failed, &config(2), None).await;

    assert_eq!(result.rounds, 3);
    assert_eq!(fetcher.calls(), 6);
    assert_eq!(result.outcomes.len(), 2);

    let by_url = |url: &str| {
        result
            .outcomes
            .iter()
            .find(|o| o.descriptor().url() == url)
            .unwrap()
    };
    assert!(by_url("https://example.com/a").is_success());
    assert!(!by_url("https://example.com/b").is_success());
}

#[tokio::test(start_paused = true)]
async fn test_default_ceiling_runs_ten_delayed_rounds() {
    let fetcher =
        MockFetcher::new().script("https://example.com/a", vec![Scripted::Status(500)]);
    let failed = vec![failure_outcome("https://example.com/a")];

    let result = retry_failed(&fetcher, failed, &config(10), None).await;

    // 1 initial round + 10 delayed retry rounds
    assert_eq!(result.rounds, 11);
    assert_eq!(fetcher.calls(), 11);
    assert!(!result.outcomes[0].is_success());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_during_backoff_surfaces_residuals() {
    use weather_data_downloader::shutdown::ShutdownCoordinator;

    let fetcher =
        MockFetcher::new().script("https://example.com/a", vec![Scripted::Status(500)]);
    let failed = vec![failure_outcome("https://example.com/a")];
    let shutdown = ShutdownCoordinator::shared();
    shutdown.request_shutdown();

    let result = retry_failed(&fetcher, failed, &config(10), Some(&shutdown)).await;

    // One dispatch round, then the backoff race observes the shutdown
    assert_eq!(result.rounds, 1);
    assert_eq!(result.outcomes.len(), 1);
    assert!(!result.outcomes[0].is_success());
}
