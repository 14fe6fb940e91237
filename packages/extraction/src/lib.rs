//! Pluggable web page extraction.
//!
//! Turns URLs into text, titles, and links behind a single [`Ingestor`]
//! trait, so callers depend on a contract rather than a specific
//! scraping backend.
//!
//! # Modules
//!
//! - [`traits`] - the `Ingestor` trait and `RawPage` type
//! - [`ingestors`] - implementations (Firecrawl API, raw HTTP, fallback
//!   composition, mock)
//! - [`error`] - typed errors (`CrawlError`)
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use extraction::{FallbackIngestor, FirecrawlIngestor, HttpIngestor, Ingestor};
//!
//! let primary = Arc::new(FirecrawlIngestor::new(api_key)?);
//! let ingestor = FallbackIngestor::new(Some(primary), Arc::new(HttpIngestor::new()?));
//! let page = ingestor.extract("https://example.com/products/verify/").await?;
//! ```

pub mod error;
pub mod ingestors;
pub mod traits;

// Re-export core types at crate root
pub use error::{CrawlError, CrawlResult};
pub use ingestors::{FallbackIngestor, FirecrawlIngestor, HttpIngestor, MockIngestor};
pub use traits::{Ingestor, RawPage};
