//! Fallback ingestor - tries a primary ingestor first, falls back to a
//! secondary on any failure.
//!
//! Used to pair the Firecrawl API (JavaScript rendering, anti-bot) with
//! the local HTTP ingestor so a single API outage or per-page failure
//! never makes a page unreachable.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::error::CrawlResult;
use crate::traits::ingestor::{Ingestor, RawPage};

/// Ingestor that tries `primary` first and falls back to `fallback`
/// when the primary call fails.
///
/// If no primary is configured (e.g. no Firecrawl API key), every call
/// goes straight to the fallback.
pub struct FallbackIngestor {
    primary: Option<Arc<dyn Ingestor>>,
    fallback: Arc<dyn Ingestor>,
}

impl FallbackIngestor {
    pub fn new(primary: Option<Arc<dyn Ingestor>>, fallback: Arc<dyn Ingestor>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl Ingestor for FallbackIngestor {
    async fn extract(&self, url: &str) -> CrawlResult<RawPage> {
        let primary = match &self.primary {
            Some(primary) => primary,
            None => return self.fallback.extract(url).await,
        };

        match primary.extract(url).await {
            Ok(page) => Ok(page),
            Err(e) => {
                warn!(
                    url = %url,
                    ingestor = primary.name(),
                    error = %e,
                    "Primary ingestor failed, falling back"
                );
                self.fallback.extract(url).await
            }
        }
    }

    fn name(&self) -> &str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestors::mock::MockIngestor;

    #[tokio::test]
    async fn test_uses_primary_when_it_succeeds() {
        let primary = Arc::new(
            MockIngestor::new().with_page(RawPage::new("https://a.com", "from primary")),
        );
        let fallback = Arc::new(
            MockIngestor::new().with_page(RawPage::new("https://a.com", "from fallback")),
        );

        let ingestor = FallbackIngestor::new(Some(primary), fallback.clone());
        let page = ingestor.extract("https://a.com").await.unwrap();

        assert_eq!(page.text, "from primary");
        assert_eq!(fallback.extract_call_count(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_on_primary_failure() {
        let primary = Arc::new(MockIngestor::new().with_failure("https://a.com"));
        let fallback = Arc::new(
            MockIngestor::new().with_page(RawPage::new("https://a.com", "from fallback")),
        );

        let ingestor = FallbackIngestor::new(Some(primary), fallback);
        let page = ingestor.extract("https://a.com").await.unwrap();

        assert_eq!(page.text, "from fallback");
    }

    #[tokio::test]
    async fn test_fails_when_both_fail() {
        let primary = Arc::new(MockIngestor::new().with_failure("https://a.com"));
        let fallback = Arc::new(MockIngestor::new().with_failure("https://a.com"));

        let ingestor = FallbackIngestor::new(Some(primary), fallback);
        assert!(ingestor.extract("https://a.com").await.is_err());
    }

    #[tokio::test]
    async fn test_no_primary_goes_straight_to_fallback() {
        let fallback =
            Arc::new(MockIngestor::new().with_page(RawPage::new("https://a.com", "content")));

        let ingestor = FallbackIngestor::new(None, fallback.clone());
        let page = ingestor.extract("https://a.com").await.unwrap();

        assert_eq!(page.text, "content");
        assert_eq!(fallback.extract_call_count(), 1);
    }
}
