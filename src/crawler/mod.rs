//! Crawler module for bounded concurrent link-graph exploration
//!
//! This module contains the core crawling logic, including:
//! - The fetch and link-extraction collaborator contracts
//! - HTTP fetching via reqwest
//! - The dispatcher loop, worker pool, and termination logic
//! - Crawl reporting

mod dispatcher;
mod fetcher;
mod parser;
mod report;

pub use dispatcher::{CrawlOptions, Dispatcher};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use parser::{HtmlLinkExtractor, LinkExtractor};
pub use report::{CrawlReport, TerminationReason};

use crate::config::Config;
use crate::CrawlError;

/// Runs a crawl with the given collaborators
///
/// This is the main library entry point. Setup-level input errors
/// (malformed seed URL, zero budget, zero concurrency, zero deadline) are
/// returned before any fetch happens; per-URL failures during the crawl are
/// recorded in the report instead.
///
/// # Arguments
///
/// * `seed_url` - The URL the crawl starts from
/// * `options` - Budget, concurrency, and deadline for this run
/// * `fetcher` - The fetch collaborator
/// * `extractor` - The link-extraction collaborator
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran to completion (including by deadline)
/// * `Err(CrawlError)` - Setup inputs were invalid
pub async fn crawl<F, X>(
    seed_url: &str,
    options: CrawlOptions,
    fetcher: F,
    extractor: X,
) -> Result<CrawlReport, CrawlError>
where
    F: Fetcher,
    X: LinkExtractor,
{
    let dispatcher = Dispatcher::new(seed_url, options, fetcher, extractor)?;
    dispatcher.run().await
}

/// Runs a crawl wired up from a configuration
///
/// Builds the production `HttpFetcher` and `HtmlLinkExtractor` from the
/// config and crawls from the configured seed.
///
/// # Example
///
/// ```no_run
/// use linkwake::config::load_config;
/// use linkwake::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let report = run_crawl(config).await?;
/// println!("{}", report);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, CrawlError> {
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let options = CrawlOptions::from(&config.crawler);
    crawl(&config.crawler.seed_url, options, fetcher, HtmlLinkExtractor).await
}
