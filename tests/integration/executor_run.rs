//! End-to-end executor runs: blocking, per-block retry, reporting, tallies.

use std::sync::Arc;

use weather_data_downloader::downloader::{DownloadConfig, DownloadError, DownloadExecutor};
use weather_data_downloader::RequestDescriptor;

use crate::support::{descriptors, CapturingReporter, MockFetcher, Scripted};

fn executor(config: DownloadConfig, reporter: Arc<CapturingReporter>) -> DownloadExecutor {
    DownloadExecutor::new(config).with_reporter(reporter)
}

#[tokio::test(start_paused = true)]
async fn test_25_descriptors_make_blocks_of_10_10_5() {
    let fetcher = MockFetcher::new();
    let reporter = Arc::new(CapturingReporter::default());
    let input = descriptors(25);

    let outcomes = executor(DownloadConfig::default(), reporter.clone())
        .run(&fetcher, &input)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 25);
    assert!(outcomes.iter().all(|o| o.is_success()));

    let blocks = reporter.blocks();
    assert_eq!(blocks.len(), 3);
    assert_eq!(
        blocks.iter().map(|b| b.requested).collect::<Vec<_>>(),
        vec![10, 10, 5]
    );
    assert!(blocks.iter().all(|b| b.retry_rounds == 0));

    let summary = &reporter.summaries()[0];
    assert_eq!(summary.blocks, 3);
    assert_eq!(summary.requested, 25);
    assert_eq!(summary.successes, 25);
    assert_eq!(summary.failures, 0);
}

#[tokio::test(start_paused = true)]
async fn test_full_block_failure_recovered_in_one_retry_round() {
    // All 10 requests answer 500 on the first wave and 200 on the retry
    let mut fetcher = MockFetcher::new();
    let input = descriptors(10);
    for descriptor in &input {
        fetcher = fetcher.script(
            descriptor.url(),
            vec![Scripted::Status(500), Scripted::Status(200)],
        );
    }
    let reporter = Arc::new(CapturingReporter::default());

    let outcomes = executor(DownloadConfig::default(), reporter.clone())
        .run(&fetcher, &input)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 10);
    assert!(outcomes.iter().all(|o| o.is_success()));
    assert_eq!(fetcher.calls(), 20);

    let blocks = reporter.blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].successes, 10);
    assert_eq!(blocks[0].failures, 0);
    assert_eq!(blocks[0].retry_rounds, 1);
}

#[tokio::test(start_paused = true)]
async fn test_residual_failure_counted_once_by_final_outcome() {
    let fetcher =
        MockFetcher::new().script("https://example.com/0", vec![Scripted::Status(500)]);
    let input = descriptors(1);
    let reporter = Arc::new(CapturingReporter::default());
    let config = DownloadConfig {
        max_retries: 2,
        ..DownloadConfig::default()
    };

    let outcomes = executor(config, reporter.clone())
        .run(&fetcher, &input)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].is_success());

    let blocks = reporter.blocks();
    assert_eq!(blocks[0].successes, 0);
    assert_eq!(blocks[0].failures, 1);
    assert_eq!(blocks[0].retry_rounds, 3);

    let summary = &reporter.summaries()[0];
    assert_eq!(summary.failures, 1);
}

#[tokio::test(start_paused = true)]
async fn test_empty_descriptor_list_makes_no_calls() {
    let fetcher = MockFetcher::new();
    let reporter = Arc::new(CapturingReporter::default());

    let outcomes = executor(DownloadConfig::default(), reporter.clone())
        .run(&fetcher, &[])
        .await
        .unwrap();

    assert!(outcomes.is_empty());
    assert_eq!(fetcher.calls(), 0);
    assert!(reporter.blocks().is_empty());

    let summary = &reporter.summaries()[0];
    assert_eq!(summary.blocks, 0);
    assert_eq!(summary.requested, 0);
}

#[tokio::test(start_paused = true)]
async fn test_blocks_resolve_strictly_in_sequence() {
    // First block's requests fail once, forcing a retry round before block 2
    let mut fetcher = MockFetcher::new();
    let input = descriptors(6);
    for descriptor in input.iter().take(3) {
        fetcher = fetcher.script(
            descriptor.url(),
            vec![Scripted::Status(503), Scripted::Status(200)],
        );
    }
    let config = DownloadConfig {
        block_size: 3,
        ..DownloadConfig::default()
    };
    let reporter = Arc::new(CapturingReporter::default());

    let outcomes = executor(config, reporter.clone())
        .run(&fetcher, &input)
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 6);

    let log = fetcher.call_log();
    let block_two_urls: Vec<&str> = input.iter().skip(3).map(RequestDescriptor::url).collect();
    let first_block_two_call = log
        .iter()
        .position(|url| block_two_urls.contains(&url.as_str()))
        .unwrap();
    let last_block_one_call = log
        .iter()
        .rposition(|url| !block_two_urls.contains(&url.as_str()))
        .unwrap();
    assert!(
        last_block_one_call < first_block_two_call,
        "block 2 started before block 1 was fully resolved"
    );
}

#[tokio::test]
async fn test_invalid_block_size_fails_fast() {
    let fetcher = MockFetcher::new();
    let config = DownloadConfig {
        block_size: 0,
        ..DownloadConfig::default()
    };

    let result = DownloadExecutor::new(config)
        .run(&fetcher, &descriptors(5))
        .await;

    assert!(matches!(result, Err(DownloadError::InvalidConfig(_))));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_shutdown_before_first_block_cancels_run() {
    use weather_data_downloader::shutdown::ShutdownCoordinator;

    let fetcher = MockFetcher::new();
    let shutdown = ShutdownCoordinator::shared();
    shutdown.request_shutdown();

    let result = DownloadExecutor::new(DownloadConfig::default())
        .with_shutdown(shutdown)
        .run(&fetcher, &descriptors(5))
        .await;

    assert!(matches!(result, Err(DownloadError::Cancelled)));
    assert_eq!(fetcher.calls(), 0);
}
