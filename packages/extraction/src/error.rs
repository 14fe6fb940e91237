//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while extracting a page.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Connection or read timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// The extraction API answered but reported failure or returned no content
    #[error("extraction service returned no content for: {url}")]
    NoContent { url: String },
}

impl CrawlError {
    /// Wrap a reqwest error, mapping timeouts to their own variant.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CrawlError::Timeout {
                url: url.to_string(),
            }
        } else {
            CrawlError::Http(Box::new(err))
        }
    }

    /// Build an HTTP error from a status code.
    pub fn from_status(url: &str, status: reqwest::StatusCode) -> Self {
        CrawlError::Http(Box::new(std::io::Error::other(format!(
            "HTTP {} for {}",
            status, url
        ))))
    }
}

/// Result type alias for extraction operations.
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;
