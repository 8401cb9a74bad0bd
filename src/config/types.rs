use serde::Deserialize;

/// Main configuration structure for linkwake
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// The URL the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of distinct pages a single run may ever fetch
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Number of concurrent fetch workers
    pub concurrency: u32,

    /// Wall-clock budget for the whole run, in seconds
    #[serde(rename = "deadline-secs")]
    pub deadline_secs: u64,

    /// Grace period for in-flight fetches at shutdown, in seconds
    #[serde(rename = "shutdown-grace-secs", default = "default_shutdown_grace")]
    pub shutdown_grace_secs: u64,
}

fn default_shutdown_grace() -> u64 {
    5
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}
