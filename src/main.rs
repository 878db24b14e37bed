//! Font-Crawl main entry point
//!
//! This is the command-line interface for the Font-Crawl service.

use anyhow::Context;
use clap::Parser;
use font_crawl::config::{load_config_with_hash, Config};
use font_crawl::crawler::{crawl, CrawlStrategy};
use font_crawl::normalize_seed_url;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Font-Crawl: a font-family census for websites
///
/// By default Font-Crawl serves its HTTP API. With `--crawl` it runs a
/// single crawl instead and prints the fonts it found as JSON.
#[derive(Parser, Debug)]
#[command(name = "font-crawl")]
#[command(version = "1.0.0")]
#[command(about = "A font-family census for websites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the settings without serving or crawling
    #[arg(long, conflicts_with = "crawl")]
    dry_run: bool,

    /// Crawl this URL once, print the result and exit
    #[arg(long, value_name = "URL")]
    crawl: Option<String>,

    /// Traversal strategy for --crawl (breadth-first or depth-first)
    #[arg(long, requires = "crawl")]
    strategy: Option<CrawlStrategy>,

    /// Maximum number of pages visited by --crawl
    #[arg(long, requires = "crawl")]
    page_limit: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if let Some(url) = cli.crawl.as_deref() {
        handle_crawl(&config, url, cli.strategy, cli.page_limit).await?;
    } else {
        font_crawl::server::serve(&config)
            .await
            .context("Server stopped")?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("font_crawl=info,tower_http=info,warn"),
            1 => EnvFilter::new("font_crawl=debug,tower_http=debug,info"),
            2 => EnvFilter::new("font_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Font-Crawl Dry Run ===\n");

    println!("Server:");
    println!("  Address: {}:{}", config.server.host, config.server.port);
    println!("  Request timeout: {}s", config.server.request_timeout_secs);

    println!("\nCrawler Configuration:");
    println!("  Default page limit: {}", config.crawler.default_page_limit);
    println!("  Max page limit: {}", config.crawler.max_page_limit);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nPopular Sites Listing:");
    println!("  Endpoint: {}", config.popular.endpoint);
    println!(
        "  Pages: {} x {} (sort {})",
        config.popular.pages, config.popular.page_size, config.popular.sort
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the --crawl mode: one crawl, result printed as JSON on stdout
async fn handle_crawl(
    config: &Config,
    url: &str,
    strategy: Option<CrawlStrategy>,
    page_limit: Option<usize>,
) -> anyhow::Result<()> {
    let seed = normalize_seed_url(url).with_context(|| format!("Invalid seed URL: {}", url))?;

    let result = crawl(config, &seed, strategy, page_limit)
        .await
        .with_context(|| format!("Crawl of {} failed", seed))?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
