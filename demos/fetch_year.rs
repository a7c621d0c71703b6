//! Example: Fetch a year of daily weather resources
//!
//! Builds one request per day of 2023 and fetches them in blocks of 10,
//! retrying failures with exponential backoff. Failed days that exhaust the
//! retry ceiling are listed at the end.
//!
//! Run with: cargo run --example fetch_year

use chrono::NaiveDate;
use weather_data_downloader::downloader::{DownloadConfig, DownloadExecutor};
use weather_data_downloader::fetcher::HttpFetcher;
use weather_data_downloader::request::daily_descriptors;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
    let descriptors = daily_descriptors("https://c3weatherapi.azurewebsites.net", start, 365);

    let fetcher = HttpFetcher::builder()
        .header("api-key", "charlie")?
        .header("random-errors", "true")?
        .build()?;

    let executor = DownloadExecutor::new(DownloadConfig::default());
    let outcomes = executor.run(&fetcher, &descriptors).await?;

    let successes = outcomes.iter().filter(|o| o.is_success()).count();
    println!(
        "{} results. Success {} Failures {}.",
        outcomes.len(),
        successes,
        outcomes.len() - successes
    );

    for outcome in outcomes.iter().filter(|o| !o.is_success()) {
        println!("still failing: {}", outcome.descriptor());
    }

    Ok(())
}
