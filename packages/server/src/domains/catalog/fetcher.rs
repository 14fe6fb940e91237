//! Catalog acquisition pipeline.
//!
//! Discovers product URLs from the seed listing page, fetches each page
//! through the (fallback-composed) ingestor with bounded concurrency,
//! resolves a name per record, and asks the oracle for structured
//! attributes. Per-URL failures are collected in [`FetchOutcome::failed`]
//! rather than raised; catalog completeness is best-effort.

use futures::stream::{self, StreamExt};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use extraction::{CrawlError, Ingestor};

use super::models::{default_catalog, Assessment, AssessmentAttributes};
use super::names;
use crate::kernel::BaseAI;

/// Maximum concurrent page fetches during a refresh.
const MAX_CONCURRENT_FETCHES: usize = 5;

lazy_static! {
    /// First `{...}` block in an oracle reply; the reply is free text
    /// and not assumed to be valid structured output.
    static ref JSON_BLOCK: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

/// One URL whose acquisition failed entirely (primary and fallback).
#[derive(Debug)]
pub struct FetchFailure {
    pub url: String,
    pub error: CrawlError,
}

/// Partial result of a catalog fetch: what succeeded and what was
/// dropped, made explicit instead of silently skipping URLs.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub records: Vec<Assessment>,
    pub failed: Vec<FetchFailure>,
}

/// Scrapes the assessment catalog from the product site.
pub struct CatalogFetcher {
    ingestor: Arc<dyn Ingestor>,
    ai: Arc<dyn BaseAI>,
    seed_url: String,
    max_concurrent: usize,
}

impl CatalogFetcher {
    pub fn new(ingestor: Arc<dyn Ingestor>, ai: Arc<dyn BaseAI>, seed_url: String) -> Self {
        Self {
            ingestor,
            ai,
            seed_url,
            max_concurrent: MAX_CONCURRENT_FETCHES,
        }
    }

    /// Fetch the full catalog. Never fails as a whole: per-URL failures
    /// are collected, and a run that yields zero records substitutes
    /// the built-in default catalog.
    pub async fn fetch(&self) -> FetchOutcome {
        let candidates = self.discover().await;
        info!(count = candidates.len(), "Fetching product pages");

        let results: Vec<(String, Result<Assessment, CrawlError>)> = stream::iter(candidates)
            .map(|url| async move {
                let record = self.fetch_record(&url).await;
                (url, record)
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut outcome = FetchOutcome::default();
        for (url, result) in results {
            match result {
                Ok(record) => outcome.records.push(record),
                Err(error) => {
                    warn!(url = %url, error = %error, "Skipping product page");
                    outcome.failed.push(FetchFailure { url, error });
                }
            }
        }

        if outcome.records.is_empty() {
            warn!("Catalog fetch yielded no records, substituting defaults");
            outcome.records = default_catalog();
        }

        info!(
            records = outcome.records.len(),
            failed = outcome.failed.len(),
            "Catalog fetch completed"
        );
        outcome
    }

    /// Discover candidate product URLs from the seed listing page.
    ///
    /// Discovery failure is non-fatal: the known seed is still
    /// processed.
    async fn discover(&self) -> Vec<String> {
        let mut urls = vec![self.seed_url.clone()];

        let seed = match Url::parse(&self.seed_url) {
            Ok(seed) => seed,
            Err(e) => {
                warn!(url = %self.seed_url, error = %e, "Invalid seed URL");
                return urls;
            }
        };

        match self.ingestor.extract(&self.seed_url).await {
            Ok(page) => {
                for link in &page.links {
                    if let Some(url) = Self::product_url(link, &seed) {
                        if !urls.contains(&url) {
                            urls.push(url);
                        }
                    }
                }
            }
            Err(e) => {
                warn!(
                    url = %self.seed_url,
                    error = %e,
                    "Link discovery failed, proceeding with known seed URLs"
                );
            }
        }

        urls
    }

    /// Resolve a link to an absolute product-detail URL, or None if it
    /// is not one (including the listing page itself).
    fn product_url(link: &str, seed: &Url) -> Option<String> {
        let resolved = seed.join(link).ok()?;
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            return None;
        }

        let url = resolved.to_string();
        if url.contains("/products/") && !url.ends_with("/products/") {
            Some(url)
        } else {
            None
        }
    }

    /// Build one catalog record from a product page.
    async fn fetch_record(&self, url: &str) -> Result<Assessment, CrawlError> {
        let page = self.ingestor.extract(url).await?;
        let name = names::resolve(page.title.as_deref(), url);
        debug!(url = %url, name = %name, "Extracted product name");

        let attributes = self.extract_attributes(&page.text, url).await;

        Ok(Assessment {
            name,
            url: url.to_string(),
            remote_testing: attributes.remote_testing,
            adaptive_support: attributes.adaptive_support,
            duration: attributes.duration,
            test_type: attributes.test_type,
        })
    }

    /// Ask the oracle for structured attributes. A reply that cannot be
    /// parsed as the expected shape yields the fixed default set.
    async fn extract_attributes(&self, content: &str, url: &str) -> AssessmentAttributes {
        let prompt = format!(
            "Analyze this SHL assessment product page content and extract the following information:\n\
             \n\
             Content: {content}\n\
             \n\
             URL: {url}\n\
             \n\
             Extract:\n\
             1. Remote testing availability (true/false)\n\
             2. Does it use adaptive/IRT technology (true/false)\n\
             3. Duration (e.g., \"15-20 minutes\")\n\
             4. Test type (e.g., \"Cognitive ability\", \"Personality assessment\")\n\
             \n\
             If information is not available, make a reasonable assumption.\n\
             Return response as JSON with keys: remote_testing (boolean), adaptive_support (boolean), duration (string), test_type (string)"
        );

        let reply = match self.ai.complete_json(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(url = %url, error = %e, "Attribute extraction call failed, using defaults");
                return AssessmentAttributes::default();
            }
        };

        parse_attributes(&reply).unwrap_or_else(|| {
            debug!(url = %url, "Unparseable attribute reply, using defaults");
            AssessmentAttributes::default()
        })
    }
}

/// Loose-parse an oracle reply into attributes: take the first `{...}`
/// block and deserialize it, with per-field defaults for missing keys.
fn parse_attributes(reply: &str) -> Option<AssessmentAttributes> {
    let block = JSON_BLOCK.find(reply)?;
    serde_json::from_str(block.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockAI;
    use extraction::{MockIngestor, RawPage};

    const SEED: &str = "https://www.shl.com/solutions/products/";

    fn fetcher(ingestor: MockIngestor, ai: MockAI) -> CatalogFetcher {
        CatalogFetcher::new(Arc::new(ingestor), Arc::new(ai), SEED.to_string())
    }

    #[test]
    fn test_product_url_filtering() {
        let seed = Url::parse(SEED).unwrap();

        // Relative product links are absolutized
        assert_eq!(
            CatalogFetcher::product_url("/solutions/products/verify/", &seed),
            Some("https://www.shl.com/solutions/products/verify/".to_string())
        );
        // The listing page itself is excluded
        assert_eq!(CatalogFetcher::product_url(SEED, &seed), None);
        // Non-product paths are excluded
        assert_eq!(
            CatalogFetcher::product_url("https://www.shl.com/about/", &seed),
            None
        );
        assert_eq!(CatalogFetcher::product_url("mailto:x@y.com", &seed), None);
    }

    #[test]
    fn test_parse_attributes_embedded_json() {
        let reply = "Sure! Here you go:\n```json\n{\"remote_testing\": false, \"adaptive_support\": true, \"duration\": \"5 minutes\", \"test_type\": \"Skills\"}\n```";
        let attrs = parse_attributes(reply).unwrap();
        assert!(!attrs.remote_testing);
        assert!(attrs.adaptive_support);
        assert_eq!(attrs.duration, "5 minutes");
        assert_eq!(attrs.test_type, "Skills");
    }

    #[test]
    fn test_parse_attributes_no_json() {
        assert!(parse_attributes("I could not find any details.").is_none());
    }

    #[tokio::test]
    async fn test_fetch_builds_records_from_discovered_links() {
        let verify = "https://www.shl.com/solutions/products/verify-interactive/";
        let ingestor = MockIngestor::new()
            .with_page(
                RawPage::new(SEED, "listing").with_links(vec![
                    "/solutions/products/verify-interactive/".to_string(),
                    "/about/".to_string(),
                ]),
            )
            .with_page(
                RawPage::new(verify, "Verify Interactive product page")
                    .with_title("Verify Interactive | SHL"),
            );
        let ai = MockAI::new().with_reply(
            r#"{"remote_testing": true, "adaptive_support": true, "duration": "10-15 minutes", "test_type": "Cognitive ability"}"#,
        );

        let outcome = fetcher(ingestor, ai).fetch().await;

        assert!(outcome.failed.is_empty());
        let urls: Vec<_> = outcome.records.iter().map(|r| r.url.as_str()).collect();
        assert!(urls.contains(&SEED));
        assert!(urls.contains(&verify));

        let record = outcome.records.iter().find(|r| r.url == verify).unwrap();
        assert_eq!(record.name, "Verify Interactive");
        assert!(record.adaptive_support);
        assert_eq!(record.duration, "10-15 minutes");
    }

    #[tokio::test]
    async fn test_total_failure_substitutes_defaults() {
        let ingestor = MockIngestor::new().with_failure(SEED);
        let ai = MockAI::new();

        let outcome = fetcher(ingestor, ai).fetch().await;

        assert_eq!(outcome.records, default_catalog());
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].url, SEED);
    }

    #[tokio::test]
    async fn test_unparseable_attribute_reply_uses_defaults() {
        let ingestor = MockIngestor::new()
            .with_page(RawPage::new(SEED, "listing page").with_title("Products | SHL"));
        let ai = MockAI::new().with_reply("no structured data here");

        let outcome = fetcher(ingestor, ai).fetch().await;

        assert_eq!(outcome.records.len(), 1);
        let record = &outcome.records[0];
        assert!(record.remote_testing);
        assert!(!record.adaptive_support);
        assert_eq!(record.duration, "20-30 minutes");
        assert_eq!(record.test_type, "Assessment");
    }

    #[tokio::test]
    async fn test_per_url_failure_is_skipped_not_fatal() {
        let verify = "https://www.shl.com/solutions/products/verify-interactive/";
        let broken = "https://www.shl.com/solutions/products/broken/";
        let ingestor = MockIngestor::new()
            .with_page(RawPage::new(SEED, "listing").with_links(vec![
                verify.to_string(),
                broken.to_string(),
            ]))
            .with_page(RawPage::new(verify, "page").with_title("Verify Interactive | SHL"))
            .with_failure(broken);
        let ai = MockAI::new().with_reply(r#"{"test_type": "Cognitive ability"}"#);

        let outcome = fetcher(ingestor, ai).fetch().await;

        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].url, broken);
        assert!(outcome.records.iter().any(|r| r.url == verify));
    }
}
