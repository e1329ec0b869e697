//! Listing-Scraper main entry point
//!
//! This is the command-line interface for the Listing-Scraper catalogue scraper.

use anyhow::Context;
use clap::Parser;
use listing_scraper::config::{
    load_env_file, load_settings_or_default, revalidate, ProxyEndpoint, Settings,
};
use listing_scraper::crawler::run_crawl;
use listing_scraper::output::{print_summary, write_markdown_report};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const SUMMARY_PRODUCTS: usize = 5;

/// Listing-Scraper: a polite paginated catalogue scraper
///
/// Fetches listing pages one at a time through an authenticated proxy and
/// extracts product records until pagination runs out or the page cap is hit.
/// Proxy credentials come from MAGNETIC_PROXY_USER and MAGNETIC_PROXY_PASSWORD.
#[derive(Parser, Debug)]
#[command(name = "listing-scraper")]
#[command(version)]
#[command(about = "A polite paginated catalogue scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// First listing page (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Maximum number of pages to crawl (overrides the config file)
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Seconds between request starts (overrides the config file)
    #[arg(long, value_name = "SECS")]
    delay: Option<f64>,

    /// Write a markdown report of every product to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Validate configuration and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` wins over the command-line verbosity when it is set.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("listing_scraper=info,warn"),
                1 => EnvFilter::new("listing_scraper=debug,info"),
                2 => EnvFilter::new("listing_scraper=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the selected mode; `Ok(false)` means the crawl ended on a fetch failure
async fn run(cli: Cli) -> anyhow::Result<bool> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let mut settings =
        load_settings_or_default(cli.config.as_deref()).context("failed to load configuration")?;
    apply_overrides(&mut settings, &cli);
    revalidate(&settings).context("invalid command-line override")?;

    if load_env_file(None).is_none() {
        tracing::debug!("No .env file found");
    }

    // Credentials are checked before any network activity
    let proxy = ProxyEndpoint::resolve(&settings.proxy).context("failed to resolve proxy")?;
    tracing::info!("Proxy: {}", proxy.redacted_url());

    if cli.dry_run {
        handle_dry_run(&settings, &proxy);
        return Ok(true);
    }

    handle_crawl(&settings, &proxy, cli.report.as_deref()).await
}

fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        settings.scraper.base_url = base_url.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        settings.scraper.max_pages = max_pages;
    }
    if let Some(delay) = cli.delay {
        settings.scraper.delay_between_requests = delay;
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(settings: &Settings, proxy: &ProxyEndpoint) {
    println!("=== Listing-Scraper Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Base URL: {}", settings.scraper.base_url);
    println!("  Max pages: {}", settings.scraper.max_pages);
    println!(
        "  Delay between requests: {}s",
        settings.scraper.delay_between_requests
    );
    println!("  Timeout: {}s", settings.scraper.timeout_secs);
    println!(
        "  Max retries: {} (not applied, requests are never retried)",
        settings.scraper.max_retries
    );
    println!("  User agent: {}", settings.scraper.user_agent);

    println!("\nProxy:");
    println!("  URL: {}", proxy.redacted_url());

    println!("\nSelectors:");
    println!("  Card: {}", settings.selectors.card);
    println!("  Title: {}", settings.selectors.title);
    println!("  Price: {}", settings.selectors.price);
    println!("  Availability: {}", settings.selectors.availability);
    println!("  Rating: {}", settings.selectors.rating);
    println!("  Next page: {}", settings.selectors.next_page);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    settings: &Settings,
    proxy: &ProxyEndpoint,
    report_path: Option<&std::path::Path>,
) -> anyhow::Result<bool> {
    let report = run_crawl(settings, proxy)
        .await
        .context("failed to initialise crawler")?;

    print_summary(&report, SUMMARY_PRODUCTS);

    if let Some(path) = report_path {
        write_markdown_report(&report, &settings.scraper.base_url, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("\n✓ Report written to: {}", path.display());
    }

    if !report.is_success() {
        tracing::error!("Crawl aborted: {}", report.stop_reason);
    }

    Ok(report.is_success())
}
