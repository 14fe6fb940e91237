//! Ingestor implementations.

pub mod fallback;
pub mod firecrawl;
pub mod http;
pub mod mock;

pub use fallback::FallbackIngestor;
pub use firecrawl::FirecrawlIngestor;
pub use http::HttpIngestor;
pub use mock::MockIngestor;
