//! HTTP fetcher
//!
//! This module defines the fetch collaborator contract consumed by the
//! dispatcher, plus the production implementation backed by `reqwest`.
//! Ordinary network failures are expected outcomes and flow through
//! [`FetchError`], never through panics or crawl-fatal errors.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value
    pub content_type: String,

    /// Page body content
    pub body: String,
}

/// Why a fetch failed
///
/// None of these abort the crawl; the dispatcher records the failure and
/// moves on to the next URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP error {0}")]
    HttpStatus(u16),

    #[error("fetch failed: {0}")]
    Other(String),
}

/// Fetch collaborator contract
///
/// One call per URL; the crawl core never calls `fetch` twice for the same
/// URL. Implementations are expected to enforce their own per-request
/// timeout so a hanging remote cannot stall a worker forever.
pub trait Fetcher: Send + Sync + 'static {
    /// Fetches a URL, returning the page content or a classified failure
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// Production fetcher backed by a shared `reqwest::Client`
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from the user agent config
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an already-built client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Other(e.to_string()))?;

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        })
    }
}

/// Maps a reqwest transport error onto the fetch error taxonomy
fn classify_request_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::ConnectionFailed(error.to_string())
    } else {
        FetchError::Other(error.to_string())
    }
}

/// Builds an HTTP client with proper configuration
///
/// The user agent is formatted as `CrawlerName/Version (+ContactURL;
/// ContactEmail)`. The per-request timeout here is what guarantees a single
/// slow server cannot block crawl termination indefinitely.
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>hello</body></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&create_test_config()).unwrap();
        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();

        let page = fetcher.fetch(&url).await.unwrap();
        assert_eq!(page.status_code, 200);
        assert!(page.body.contains("hello"));
        assert!(page.content_type.contains("text/html"));
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&create_test_config()).unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();

        match fetcher.fetch(&url).await {
            Err(FetchError::HttpStatus(404)) => {}
            other => panic!("expected HttpStatus(404), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_connection_failed() {
        let fetcher = HttpFetcher::new(&create_test_config()).unwrap();
        // Nothing listens on this port
        let url = Url::parse("http://127.0.0.1:1/").unwrap();

        match fetcher.fetch(&url).await {
            Err(FetchError::ConnectionFailed(_)) | Err(FetchError::Other(_)) => {}
            other => panic!("expected connection failure, got {:?}", other),
        }
    }
}
