use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Default catalog cache TTL (24 hours).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gemini_api_key: String,
    /// Optional - page extraction degrades to raw HTTP fetching when absent
    pub firecrawl_api_key: Option<String>,
    pub cache_path: PathBuf,
    pub cache_ttl_secs: u64,
    pub catalog_seed_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
            firecrawl_api_key: env::var("FIRECRAWL_API_KEY").ok().filter(|k| !k.is_empty()),
            cache_path: env::var("CACHE_PATH")
                .unwrap_or_else(|_| "shl_assessments_cache.json".to_string())
                .into(),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_CACHE_TTL_SECS.to_string())
                .parse()
                .context("CACHE_TTL_SECS must be a valid number")?,
            catalog_seed_url: env::var("CATALOG_SEED_URL")
                .unwrap_or_else(|_| "https://www.shl.com/solutions/products/".to_string()),
        })
    }
}
