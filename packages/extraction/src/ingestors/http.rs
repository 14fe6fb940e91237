//! HTTP-based ingestor implementation.
//!
//! Fetches raw HTML with reqwest and parses it locally:
//! - `scraper` for CSS-selector based title and link extraction
//! - `htmd` for HTML to Markdown conversion
//!
//! No JavaScript rendering; suitable as a fallback for static pages
//! when the Firecrawl API is unavailable or fails.

use async_trait::async_trait;
use chrono::Utc;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{CrawlError, CrawlResult};
use crate::traits::ingestor::{Ingestor, RawPage};

/// HTTP ingestor using reqwest + scraper + htmd.
pub struct HttpIngestor {
    client: reqwest::Client,
}

impl HttpIngestor {
    pub fn new() -> CrawlResult<Self> {
        // Browser-like User-Agent to avoid trivial bot detection
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| CrawlError::Http(Box::new(e)))?;

        Ok(Self { client })
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Fetch raw HTML from a URL.
    async fn fetch_html(&self, url: &str) -> CrawlResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CrawlError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::from_status(url, status));
        }

        response
            .text()
            .await
            .map_err(|e| CrawlError::Http(Box::new(e)))
    }

    /// Extract the title from an HTML document.
    fn extract_title(document: &Html) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;
        document
            .select(&title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Remove script/style/nav boilerplate from an HTML string.
    fn remove_boilerplate(html: &str) -> String {
        let document = Html::parse_document(html);
        let unwanted = [
            "script", "style", "noscript", "iframe", "nav", "header", "footer", "aside",
        ];

        let mut result = html.to_string();
        for selector_str in unwanted {
            if let Ok(selector) = Selector::parse(selector_str) {
                for element in document.select(&selector) {
                    let element_html = element.html();
                    result = result.replace(&element_html, "");
                }
            }
        }

        result
    }

    /// Convert HTML to Markdown, falling back to stripped plain text.
    fn html_to_markdown(html: &str) -> String {
        htmd::convert(html).unwrap_or_else(|_| {
            let document = Html::parse_document(html);
            document.root_element().text().collect::<String>()
        })
    }

    /// Extract absolute HTTP(S) links from an HTML document.
    fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
        let link_selector = match Selector::parse("a[href]") {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        document
            .select(&link_selector)
            .filter_map(|el| el.value().attr("href"))
            .filter(|href| {
                !href.starts_with('#')
                    && !href.starts_with("javascript:")
                    && !href.starts_with("mailto:")
                    && !href.starts_with("tel:")
            })
            .filter_map(|href| base_url.join(href).ok())
            .filter(|url| url.scheme() == "http" || url.scheme() == "https")
            .map(|url| url.to_string())
            .collect()
    }
}

#[async_trait]
impl Ingestor for HttpIngestor {
    async fn extract(&self, url: &str) -> CrawlResult<RawPage> {
        let base_url = Url::parse(url).map_err(|_| CrawlError::InvalidUrl {
            url: url.to_string(),
        })?;

        debug!(url = %url, "HTTP fetch starting");
        let html = self.fetch_html(url).await?;
        let document = Html::parse_document(&html);

        let title = Self::extract_title(&document);
        let links = Self::extract_links(&document, &base_url);
        let text = Self::html_to_markdown(&Self::remove_boilerplate(&html));

        let mut page = RawPage {
            url: url.to_string(),
            text,
            title: None,
            links,
            fetched_at: Utc::now(),
        };
        if let Some(title) = title {
            page = page.with_title(title);
        }

        Ok(page)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(
            HttpIngestor::extract_title(&document),
            Some("Test Page".to_string())
        );
    }

    #[test]
    fn test_extract_title_empty() {
        let html = r#"<html><head><title>  </title></head><body></body></html>"#;
        let document = Html::parse_document(html);
        assert_eq!(HttpIngestor::extract_title(&document), None);
    }

    #[test]
    fn test_extract_links_resolves_relative() {
        let html = r##"<body>
            <a href="/solutions/products/verify/">Verify</a>
            <a href="https://other.com/page">Other</a>
            <a href="#section">Anchor</a>
            <a href="mailto:x@y.com">Mail</a>
        </body>"##;
        let document = Html::parse_document(html);
        let base = Url::parse("https://www.shl.com/solutions/products/").unwrap();

        let links = HttpIngestor::extract_links(&document, &base);
        assert_eq!(
            links,
            vec![
                "https://www.shl.com/solutions/products/verify/".to_string(),
                "https://other.com/page".to_string(),
            ]
        );
    }

    #[test]
    fn test_html_to_markdown() {
        let html = "<h1>Hello</h1><p>World</p>";
        let md = HttpIngestor::html_to_markdown(html);
        assert!(md.contains("Hello"));
        assert!(md.contains("World"));
    }

    #[test]
    fn test_remove_boilerplate_strips_scripts() {
        let html = "<html><body><script>alert(1)</script><p>Keep me</p></body></html>";
        let cleaned = HttpIngestor::remove_boilerplate(html);
        assert!(!cleaned.contains("alert(1)"));
        assert!(cleaned.contains("Keep me"));
    }
}
