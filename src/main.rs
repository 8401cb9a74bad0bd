//! Linkwake main entry point
//!
//! Command-line interface for the linkwake bounded crawler.

use anyhow::Context;
use clap::Parser;
use linkwake::config::load_config;
use linkwake::crawler::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linkwake: a bounded concurrent web crawler
///
/// Linkwake crawls the link graph reachable from a seed URL breadth-first,
/// under a global page budget and a wall-clock deadline, fetching each URL
/// at most once.
#[derive(Parser, Debug)]
#[command(name = "linkwake")]
#[command(version)]
#[command(about = "A bounded concurrent web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Override the configured seed URL
    #[arg(long)]
    seed: Option<String>,

    /// Override the configured page budget
    #[arg(long)]
    max_pages: Option<u32>,

    /// Override the configured worker count
    #[arg(long)]
    concurrency: Option<u32>,

    /// Override the configured deadline (seconds)
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    // CLI overrides take precedence over the file
    if let Some(seed) = cli.seed {
        config.crawler.seed_url = seed;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if let Some(deadline_secs) = cli.deadline_secs {
        config.crawler.deadline_secs = deadline_secs;
    }
    linkwake::config::validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let report = run_crawl(config).await.context("crawl failed")?;

    println!("Crawl finished: {}", report.termination);
    println!("  Pages admitted:  {}", report.admitted);
    println!("  Pages fetched:   {}", report.pages_fetched);
    println!("  Fetch failures:  {}", report.fetch_failures);
    println!("  Elapsed:         {:.2?}", report.elapsed);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkwake=info,warn"),
            1 => EnvFilter::new("linkwake=debug,info"),
            2 => EnvFilter::new("linkwake=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &linkwake::config::Config) {
    println!("=== Linkwake Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Concurrency: {}", config.crawler.concurrency);
    println!("  Deadline: {}s", config.crawler.deadline_secs);
    println!("  Shutdown grace: {}s", config.crawler.shutdown_grace_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl up to {} pages", config.crawler.max_pages);
}
