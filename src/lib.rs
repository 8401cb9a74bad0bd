//! Linkwake: a bounded concurrent web crawler
//!
//! Starting from a single seed URL, linkwake explores the reachable link
//! graph breadth-first with a fixed-size pool of concurrent fetch workers,
//! under a global page budget and a wall-clock deadline. Every reachable URL
//! is fetched at most once.

pub mod config;
pub mod crawler;
pub mod state;

use thiserror::Error;

/// Main error type for linkwake operations
///
/// These are setup-level failures, reported synchronously before a crawl
/// begins. Per-URL fetch failures are not errors; they are recorded in the
/// [`crawler::CrawlReport`] and never abort the crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("max-pages must be at least 1")]
    ZeroBudget,

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("deadline must be non-zero")]
    ZeroDeadline,

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for linkwake operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    crawl, run_crawl, CrawlOptions, CrawlReport, FetchError, FetchedPage, Fetcher, LinkExtractor,
    TerminationReason,
};
pub use state::{CrawlState, Frontier, VisitedSet};
