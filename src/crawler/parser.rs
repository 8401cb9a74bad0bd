//! Link extraction from fetched page content
//!
//! Defines the extraction collaborator contract and the production HTML
//! implementation. Extraction is pure and deterministic: same content and
//! base URL, same candidate list. Malformed content simply yields fewer
//! candidates; it never fails the crawl.

use scraper::{Html, Selector};
use url::Url;

/// Link extraction collaborator contract
pub trait LinkExtractor: Send + Sync + 'static {
    /// Returns the candidate URLs found in `content`
    ///
    /// Relative references are resolved against `base_url`. The result is
    /// finite and may contain duplicates; deduplication is the admission
    /// gate's job, not the extractor's.
    fn extract(&self, content: &str, base_url: &Url) -> Vec<Url>;
}

/// Extracts `a[href]` links from HTML documents
///
/// **Include:** anchor tags anywhere in the document.
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same-page anchors)
/// - `<a href="..." download>` links
/// - Anything that does not resolve to an HTTP(S) URL
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, content: &str, base_url: &Url) -> Vec<Url> {
        let document = Html::parse_document(content);
        let mut links = Vec::new();

        if let Ok(selector) = Selector::parse("a[href]") {
            for element in document.select(&selector) {
                if element.value().attr("download").is_some() {
                    continue;
                }
                if let Some(href) = element.value().attr("href") {
                    if let Some(url) = resolve_link(href, base_url) {
                        links.push(url);
                    }
                }
            }
        }

        links
    }
}

/// Resolves a link href to an absolute URL and validates it
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Fragment-only links point back at the same page
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    fn extract(html: &str) -> Vec<Url> {
        HtmlLinkExtractor.extract(html, &base_url())
    }

    #[test]
    fn test_extract_absolute_link() {
        let links = extract(r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://other.com/page");
    }

    #[test]
    fn test_extract_relative_link() {
        let links = extract(r#"<html><body><a href="/other">Link</a></body></html>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://example.com/other");
    }

    #[test]
    fn test_extract_relative_path_link() {
        let links = extract(r#"<html><body><a href="other">Link</a></body></html>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://example.com/other");
    }

    #[test]
    fn test_skip_javascript_link() {
        let links = extract(r#"<html><body><a href="javascript:void(0)">Link</a></body></html>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_mailto_and_tel_links() {
        let links = extract(
            r#"<html><body>
                <a href="mailto:test@example.com">Email</a>
                <a href="tel:+1234567890">Call</a>
            </body></html>"#,
        );
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_data_uri() {
        let links = extract(r#"<html><body><a href="data:text/html,<h1>x</h1>">Data</a></body></html>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_download_link() {
        let links = extract(r#"<html><body><a href="/file.pdf" download>Download</a></body></html>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let links = extract(r##"<html><body><a href="#section">Jump</a></body></html>"##);
        assert!(links.is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        // Dedup belongs to the visited set, not the extractor
        let links = extract(
            r#"<html><body>
                <a href="/page1">Link</a>
                <a href="/page1">Link again</a>
            </body></html>"#,
        );
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_malformed_html_yields_what_it_can() {
        let links = extract(r#"<html><body><a href="/valid">ok<div><a href="/also-valid""#);
        assert!(!links.is_empty());
    }

    #[test]
    fn test_mixed_valid_and_invalid_links() {
        let links = extract(
            r#"<html><body>
                <a href="/valid">Valid</a>
                <a href="javascript:alert('no')">Invalid</a>
                <a href="ftp://example.com/file">Invalid</a>
                <a href="/another-valid">Valid</a>
            </body></html>"#,
        );
        assert_eq!(links.len(), 2);
    }
}
