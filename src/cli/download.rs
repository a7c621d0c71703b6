//! Download command implementation

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing::info;

use crate::downloader::config::{
    DEFAULT_BACKOFF_BASE_SECS, DEFAULT_BLOCK_SIZE, DEFAULT_MAX_RETRIES,
};
use crate::downloader::{DownloadConfig, DownloadExecutor};
use crate::fetcher::HttpFetcher;
use crate::request::daily_descriptors;
use crate::shutdown::SharedShutdown;
use crate::Outcome;

use super::CliError;

/// Default endpoint serving one resource per `YYYY-MM-DD` path segment.
const DEFAULT_BASE_URL: &str = "https://c3weatherapi.azurewebsites.net";

/// Parse a `YYYY-MM-DD` date argument.
fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date (expected YYYY-MM-DD): {e}"))
}

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(
    name = "weather-data-downloader",
    version,
    about = "Bulk-fetch date-indexed resources in concurrent blocks with retry"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch one resource per day over a date range
    Download(DownloadArgs),
}

/// Arguments for the download command.
#[derive(Debug, Parser)]
pub struct DownloadArgs {
    /// Base endpoint URL; the date is appended as a path segment
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// First date to fetch (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start_date: NaiveDate,

    /// Number of consecutive days to fetch
    #[arg(long, default_value_t = 365)]
    pub days: u32,

    /// Requests dispatched concurrently per block
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Retry rounds before residual failures are accepted
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Exponential backoff base in seconds
    #[arg(long, default_value_t = DEFAULT_BACKOFF_BASE_SECS)]
    pub backoff_base: u64,

    /// API key sent as the `api-key` header on every request
    #[arg(long, env = "API_KEY")]
    pub api_key: Option<String>,

    /// Extra fixed header in `name=value` form, repeatable
    #[arg(long = "header", value_name = "NAME=VALUE")]
    pub headers: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Print every response's status and body to stdout
    #[arg(long)]
    pub print_bodies: bool,

    /// Emit the final outcomes as a JSON array instead of a text tally
    #[arg(long)]
    pub json: bool,
}

impl DownloadArgs {
    fn build_fetcher(&self) -> Result<HttpFetcher, CliError> {
        let mut builder = HttpFetcher::builder();

        if let Some(api_key) = &self.api_key {
            builder = builder.header("api-key", api_key)?;
        }
        for header in &self.headers {
            let (name, value) = header.split_once('=').ok_or_else(|| {
                CliError::InvalidArgument(format!("header must be NAME=VALUE, got '{header}'"))
            })?;
            builder = builder.header(name, value)?;
        }
        if let Some(secs) = self.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(builder.build()?)
    }

    fn print_results(&self, outcomes: &[Outcome]) -> Result<(), CliError> {
        if self.json {
            let rendered = serde_json::to_string_pretty(outcomes)
                .map_err(|e| CliError::OutputError(e.to_string()))?;
            println!("{rendered}");
            return Ok(());
        }

        if self.print_bodies {
            for outcome in outcomes {
                match (outcome.status(), outcome.body()) {
                    (Some(status), body) => println!(
                        "Status Code: {status} Content: {}",
                        body.unwrap_or_default()
                    ),
                    (None, _) => match outcome {
                        Outcome::Failure { descriptor, failure } => {
                            println!("{descriptor}: no response ({failure})");
                        }
                        Outcome::Success { .. } => {}
                    },
                }
            }
        }

        let successes = outcomes.iter().filter(|o| o.is_success()).count();
        let failures = outcomes.len() - successes;
        println!(
            "{} results. Success {successes} Failures {failures}.",
            outcomes.len()
        );
        Ok(())
    }

    /// Execute the download. Returns the number of residual failures so the
    /// caller can decide the process exit code.
    pub async fn execute(&self, shutdown: SharedShutdown) -> Result<usize, CliError> {
        let descriptors = daily_descriptors(&self.base_url, self.start_date, self.days);
        info!(
            base_url = %self.base_url,
            start_date = %self.start_date,
            days = self.days,
            "building request list"
        );

        let fetcher = self.build_fetcher()?;
        let config = DownloadConfig {
            block_size: self.block_size,
            max_retries: self.max_retries,
            backoff_base_secs: self.backoff_base,
            ..DownloadConfig::default()
        };

        let executor = DownloadExecutor::new(config).with_shutdown(shutdown);
        let outcomes = executor.run(&fetcher, &descriptors).await?;

        self.print_results(&outcomes)?;

        Ok(outcomes.iter().filter(|o| !o.is_success()).count())
    }
}
