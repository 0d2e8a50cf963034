//! The `scrape` command: config overrides, the scrape run, and CSV output.

use std::path::PathBuf;

use clap::Args;
use scout_core::AppConfig;
use scout_scraper::{write_csv, FetchClient, LivePacer, PageParser, ScrapeOrchestrator};

/// Flags that override the env-derived configuration.
#[derive(Debug, Default, Args)]
pub struct ScrapeArgs {
    /// Search keyword; repeat to scrape several. Replaces the configured list.
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// CSV destination
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum pause after each keyword, in seconds
    #[arg(long)]
    pub min_delay: Option<f64>,

    /// Maximum pause after each keyword, in seconds
    #[arg(long)]
    pub max_delay: Option<f64>,

    /// Attempts per page fetch, including the first
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Keep only the first listing per ASIN on each page
    #[arg(long)]
    pub dedupe: bool,
}

/// Applies CLI flags on top of `config` and re-validates the result.
///
/// # Errors
///
/// Returns an error if the combined settings are inconsistent (e.g.
/// `--max-delay` below the configured minimum).
pub(crate) fn apply_overrides(mut config: AppConfig, args: &ScrapeArgs) -> anyhow::Result<AppConfig> {
    let keywords: Vec<String> = args
        .keywords
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    if !keywords.is_empty() {
        config.keywords = keywords;
    }
    if let Some(output) = &args.output {
        config.output_path.clone_from(output);
    }
    if let Some(min_delay) = args.min_delay {
        config.min_delay_secs = min_delay;
    }
    if let Some(max_delay) = args.max_delay {
        config.max_delay_secs = max_delay;
    }
    if let Some(max_retries) = args.max_retries {
        config.max_retries = max_retries;
    }
    if args.dedupe {
        config.dedupe_by_identifier = true;
    }

    config.validate()?;
    Ok(config)
}

/// Scrapes all configured keywords and writes the CSV.
///
/// Per-keyword fetch failures are logged by the orchestrator and never abort
/// the run; the CSV is written even when no listings were found.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed or the CSV
/// cannot be written.
pub(crate) async fn run_scrape(config: &AppConfig) -> anyhow::Result<()> {
    let client = FetchClient::new(
        &config.base_url,
        config.request_timeout_secs,
        config.max_retries,
        LivePacer,
    )
    .map_err(|e| anyhow::anyhow!("failed to build fetch client: {e}"))?;
    let parser = PageParser::new(&config.base_url).with_dedupe(config.dedupe_by_identifier);
    let orchestrator = ScrapeOrchestrator::new(
        client,
        parser,
        &config.base_url,
        config.min_delay_secs,
        config.max_delay_secs,
    );

    tracing::info!(
        keywords = config.keywords.len(),
        base_url = %config.base_url,
        "starting scrape run"
    );
    let records = orchestrator.scrape_all(config.keywords.as_slice()).await;

    let path = write_csv(&records, &config.output_path)?;
    tracing::info!(path = %path.display(), records = records.len(), "saved");
    Ok(())
}
