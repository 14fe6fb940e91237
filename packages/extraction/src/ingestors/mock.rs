//! Mock ingestor for testing.
//!
//! Provides a configurable mock implementation of the Ingestor trait.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{CrawlError, CrawlResult};
use crate::traits::ingestor::{Ingestor, RawPage};

/// Mock ingestor for testing.
///
/// Allows configuring canned pages per URL, plus URLs that should fail.
/// Unknown URLs fail with [`CrawlError::NoContent`].
///
/// # Example
///
/// ```rust
/// use extraction::ingestors::MockIngestor;
/// use extraction::RawPage;
///
/// let mock = MockIngestor::new()
///     .with_page(RawPage::new("https://example.com", "# Hello"))
///     .with_failure("https://blocked.example.com");
/// ```
#[derive(Default)]
pub struct MockIngestor {
    /// Canned pages indexed by URL
    pages: Arc<RwLock<HashMap<String, RawPage>>>,
    /// URLs that always fail
    failures: Arc<RwLock<HashSet<String>>>,
    /// URLs requested via extract, in call order
    extract_calls: Arc<RwLock<Vec<String>>>,
}

impl MockIngestor {
    /// Create a new empty mock ingestor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page that will be returned by extract.
    pub fn add_page(&self, page: RawPage) {
        self.pages.write().unwrap().insert(page.url.clone(), page);
    }

    /// Mark a URL as always failing.
    pub fn add_failure(&self, url: impl Into<String>) {
        self.failures.write().unwrap().insert(url.into());
    }

    /// Add a page (builder pattern).
    pub fn with_page(self, page: RawPage) -> Self {
        self.add_page(page);
        self
    }

    /// Mark a URL as always failing (builder pattern).
    pub fn with_failure(self, url: impl Into<String>) -> Self {
        self.add_failure(url);
        self
    }

    /// Get the number of times extract was called.
    pub fn extract_call_count(&self) -> usize {
        self.extract_calls.read().unwrap().len()
    }

    /// Get the URLs that were requested via extract.
    pub fn extract_calls(&self) -> Vec<String> {
        self.extract_calls.read().unwrap().clone()
    }

    /// Clear all pages, failures, and recorded calls.
    pub fn reset(&self) {
        self.pages.write().unwrap().clear();
        self.failures.write().unwrap().clear();
        self.extract_calls.write().unwrap().clear();
    }
}

impl Clone for MockIngestor {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            failures: Arc::clone(&self.failures),
            extract_calls: Arc::clone(&self.extract_calls),
        }
    }
}

#[async_trait]
impl Ingestor for MockIngestor {
    async fn extract(&self, url: &str) -> CrawlResult<RawPage> {
        self.extract_calls.write().unwrap().push(url.to_string());

        if self.failures.read().unwrap().contains(url) {
            return Err(CrawlError::Http(Box::new(std::io::Error::other(format!(
                "mock failure for {}",
                url
            )))));
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| CrawlError::NoContent {
                url: url.to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_canned_page_and_records_calls() {
        let mock = MockIngestor::new().with_page(
            RawPage::new("https://example.com", "content").with_title("Example"),
        );

        let page = mock.extract("https://example.com").await.unwrap();
        assert_eq!(page.title, Some("Example".to_string()));

        assert!(mock.extract("https://missing.com").await.is_err());
        assert_eq!(
            mock.extract_calls(),
            vec![
                "https://example.com".to_string(),
                "https://missing.com".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_configured_failure() {
        let mock = MockIngestor::new()
            .with_page(RawPage::new("https://a.com", "x"))
            .with_failure("https://a.com");

        // Failure takes precedence over the canned page
        assert!(mock.extract("https://a.com").await.is_err());
    }
}
