//! Shelf-Scout main entry point
//!
//! This is the command-line interface for the Shelf-Scout product crawler.

use anyhow::Context;
use clap::Parser;
use shelf_scout::config::{load_config_with_hash, PaginationType, SiteConfig};
use shelf_scout::crawler::Coordinator;
use shelf_scout::output::{default_output_path, print_summary, write_result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelf-Scout: a configuration-driven product crawler
///
/// Shelf-Scout walks a site's listing pages, collects product links, and
/// extracts a structured record from each product page using the selectors
/// given in the site configuration.
#[derive(Parser, Debug)]
#[command(name = "shelf-scout")]
#[command(version = "1.0.0")]
#[command(about = "A configuration-driven product crawler", long_about = None)]
struct Cli {
    /// Path to site configuration file (YAML, TOML or JSON)
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Maximum number of products to scrape
    #[arg(short, long, default_value_t = 100)]
    limit: usize,

    /// Output JSON file (default: data/products_<category>.json)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long)]
    dry_run: bool,
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
        handle_dry_run(&config, &config_hash, cli.limit);
        return Ok(());
    }

    let output_path = cli
        .output
        .unwrap_or_else(|| default_output_path(&config.category));

    handle_scrape(config, cli.limit, output_path).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_scout=info,warn"),
            1 => EnvFilter::new("shelf_scout=debug,info"),
            2 => EnvFilter::new("shelf_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated config without fetching
fn handle_dry_run(config: &SiteConfig, config_hash: &str, limit: usize) {
    println!("=== Shelf-Scout Dry Run ===\n");

    println!("Site: {}", config.site_name);
    println!("Category: {}", config.category);
    println!("Config hash: {}", config_hash);

    println!("\nStart URLs ({}):", config.start_urls.len());
    for url in &config.start_urls {
        println!("  - {}", url);
    }

    println!("\nPagination:");
    match config.pagination.kind {
        PaginationType::UrlParam => println!(
            "  Query parameter '{}', up to {} pages per start URL",
            config.pagination.param_name, config.pagination.max_pages
        ),
        PaginationType::None => println!("  Disabled"),
        PaginationType::Unsupported => println!("  Unsupported type, start URLs only"),
    }

    println!("\nSelectors:");
    println!("  Product links: {}", config.selectors.listing.product_links);
    for (field, selector) in config.selectors.detail.entries() {
        println!("  {}: {}", field, selector);
    }

    println!("\nRate limit: {}s between requests", config.rate_limit.delay_between_pages);
    println!(
        "Errors: skip_on_error={}, log_errors={}",
        config.error_handling.skip_on_error, config.error_handling.log_errors
    );

    println!("\n✓ Configuration is valid");
    println!("✓ Would scrape up to {} products", limit);
}

/// Handles the main scrape operation
async fn handle_scrape(config: SiteConfig, limit: usize, output_path: PathBuf) -> anyhow::Result<()> {
    let mut coordinator = Coordinator::new(config).context("Failed to initialize scraper")?;

    let result = coordinator.run(limit).await.context("Scrape failed")?;

    write_result(&result, &output_path)
        .with_context(|| format!("Failed to write results to {}", output_path.display()))?;

    print_summary(&result, &output_path);

    Ok(())
}
