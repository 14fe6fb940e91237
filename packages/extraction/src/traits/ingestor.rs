//! Ingestor trait for pluggable page extraction.
//!
//! An Ingestor turns a URL into a [`RawPage`]: the page's text content,
//! its title when one could be determined, and the links found on it.
//! Implementations differ in how they get there:
//!
//! - `FirecrawlIngestor` - Firecrawl API (JavaScript rendering, anti-bot)
//! - `HttpIngestor` - direct HTTP fetch + local HTML parsing
//! - `FallbackIngestor` - primary ingestor with automatic fallback
//! - `MockIngestor` - canned responses for tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CrawlResult;

/// Extracted page content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    /// URL the content was extracted from
    pub url: String,

    /// Page text (markdown or plain text, markup stripped)
    pub text: String,

    /// Page title if one was found
    pub title: Option<String>,

    /// Absolute URLs of links discovered on the page
    #[serde(default)]
    pub links: Vec<String>,

    /// When the content was fetched
    pub fetched_at: DateTime<Utc>,
}

impl RawPage {
    /// Create a new raw page with minimal fields.
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            title: None,
            links: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the discovered links.
    pub fn with_links(mut self, links: Vec<String>) -> Self {
        self.links = links;
        self
    }

    /// Check if this page has any text content.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Ingestor trait for pluggable page extraction.
///
/// Every call is independently fallible; callers decide whether a
/// failure is fatal or skippable. Implementations must bound each
/// network call with a timeout.
#[async_trait]
pub trait Ingestor: Send + Sync {
    /// Fetch a single URL and extract its text, title, and links.
    async fn extract(&self, url: &str) -> CrawlResult<RawPage>;

    /// Get the ingestor name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_page_builder() {
        let page = RawPage::new("https://example.com", "Hello, world!")
            .with_title("Example")
            .with_links(vec!["https://example.com/a".to_string()]);

        assert_eq!(page.url, "https://example.com");
        assert_eq!(page.title, Some("Example".to_string()));
        assert_eq!(page.links.len(), 1);
        assert!(page.has_content());
    }

    #[test]
    fn test_empty_content_detection() {
        let empty = RawPage::new("https://example.com", "   ");
        assert!(!empty.has_content());
    }
}
