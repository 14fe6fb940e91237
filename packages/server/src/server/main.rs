// Main entry point for the assessment recommender API server

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use extraction::{FallbackIngestor, FirecrawlIngestor, HttpIngestor, Ingestor};
use server_core::domains::catalog::FileCatalogStore;
use server_core::kernel::GeminiClient;
use server_core::server::{build_app, AppState};
use server_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SHL Assessment Recommender API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Page extraction: Firecrawl primary (when configured) with raw-HTTP fallback
    let primary: Option<Arc<dyn Ingestor>> = match &config.firecrawl_api_key {
        Some(key) => {
            tracing::info!("Firecrawl extraction enabled");
            Some(Arc::new(
                FirecrawlIngestor::new(key.clone()).context("Failed to create Firecrawl client")?,
            ))
        }
        None => {
            tracing::info!("Firecrawl extraction disabled (no API key), using raw HTTP only");
            None
        }
    };
    let fallback = Arc::new(HttpIngestor::new().context("Failed to create HTTP client")?);
    let ingestor: Arc<dyn Ingestor> = Arc::new(FallbackIngestor::new(primary, fallback));

    // Oracle and catalog cache
    let ai = Arc::new(GeminiClient::new(&config.gemini_api_key));
    let store = Arc::new(FileCatalogStore::open(
        config.cache_path.clone(),
        config.cache_ttl_secs,
    ));
    tracing::info!(path = %config.cache_path.display(), "Catalog cache opened");

    // Build application
    let state = AppState::new(store, ai, ingestor, config.catalog_seed_url.clone());
    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
