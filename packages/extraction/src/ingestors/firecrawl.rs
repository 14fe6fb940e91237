//! Firecrawl-based ingestor implementation.
//!
//! Uses the Firecrawl API for scraping JavaScript-heavy sites with
//! anti-bot protection. Returns markdown content plus the links
//! discovered on the page.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{CrawlError, CrawlResult};
use crate::traits::ingestor::{Ingestor, RawPage};

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

/// Default per-request timeout (seconds).
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Firecrawl-based ingestor.
///
/// # Example
///
/// ```rust,ignore
/// use extraction::ingestors::FirecrawlIngestor;
///
/// let api_key = std::env::var("FIRECRAWL_API_KEY").unwrap();
/// let ingestor = FirecrawlIngestor::new(api_key)?;
/// let page = ingestor.extract("https://example.com").await?;
/// ```
pub struct FirecrawlIngestor {
    client: Client,
    api_key: String,
}

// Request/Response types for the Firecrawl scrape endpoint

#[derive(Serialize)]
struct ScrapeRequest {
    url: String,
    formats: Vec<String>,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    success: bool,
    data: Option<ScrapeData>,
}

#[derive(Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
    #[serde(default)]
    links: Vec<String>,
    metadata: Option<PageMetadata>,
}

#[derive(Deserialize)]
struct PageMetadata {
    title: Option<String>,
}

impl FirecrawlIngestor {
    /// Create a new Firecrawl ingestor with the given API key.
    pub fn new(api_key: impl Into<String>) -> CrawlResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CrawlError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    async fn scrape(&self, url: &str) -> CrawlResult<ScrapeResponse> {
        let endpoint = format!("{}/scrape", FIRECRAWL_API_URL);
        let body = ScrapeRequest {
            url: url.to_string(),
            formats: vec!["markdown".to_string(), "links".to_string()],
        };

        let response = self
            .client
            .post(&endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CrawlError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CrawlError::Http(Box::new(std::io::Error::other(format!(
                "Firecrawl API error: {} - {}",
                status, text
            )))));
        }

        response
            .json()
            .await
            .map_err(|e| CrawlError::Http(Box::new(e)))
    }
}

#[async_trait]
impl Ingestor for FirecrawlIngestor {
    async fn extract(&self, url: &str) -> CrawlResult<RawPage> {
        tracing::debug!(url = %url, "Firecrawl scrape starting");

        let response = self.scrape(url).await?;

        let data = match response {
            ScrapeResponse {
                success: true,
                data: Some(data),
            } => data,
            _ => {
                return Err(CrawlError::NoContent {
                    url: url.to_string(),
                })
            }
        };

        let text = data.markdown.ok_or_else(|| CrawlError::NoContent {
            url: url.to_string(),
        })?;

        let mut page = RawPage {
            url: url.to_string(),
            text,
            title: None,
            links: data.links,
            fetched_at: Utc::now(),
        };
        if let Some(title) = data.metadata.and_then(|m| m.title) {
            page = page.with_title(title);
        }

        Ok(page)
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}
