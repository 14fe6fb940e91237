//! Catalog lifecycle: cache-or-fetch and forced refresh.

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use super::fetcher::CatalogFetcher;
use super::models::Assessment;
use super::normalize::normalize;
use super::store::{CacheState, CatalogStore};

/// Outcome of a forced refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshSummary {
    pub count: usize,
    pub unnamed_count: usize,
    pub failed_count: usize,
}

/// Serve the cached catalog, refreshing it first when stale.
pub async fn get_or_refresh(
    store: &dyn CatalogStore,
    fetcher: &CatalogFetcher,
) -> Result<Vec<Assessment>> {
    if let CacheState::Fresh(catalog) = store.get().await {
        info!(count = catalog.len(), "Serving cached catalog");
        return Ok(catalog);
    }

    info!("Cache stale, fetching fresh catalog");
    let outcome = fetcher.fetch().await;
    let catalog = normalize(outcome.records);
    store.set(catalog.clone()).await?;

    Ok(catalog)
}

/// Invalidate the cache and fetch a fresh catalog unconditionally.
pub async fn force_refresh(
    store: &dyn CatalogStore,
    fetcher: &CatalogFetcher,
) -> Result<RefreshSummary> {
    store.invalidate().await?;

    let outcome = fetcher.fetch().await;
    let catalog = normalize(outcome.records);
    let unnamed_count = catalog.iter().filter(|a| a.is_unnamed()).count();

    store.set(catalog.clone()).await?;

    let summary = RefreshSummary {
        count: catalog.len(),
        unnamed_count,
        failed_count: outcome.failed.len(),
    };
    info!(
        count = summary.count,
        unnamed = summary.unnamed_count,
        failed = summary.failed_count,
        "Catalog refreshed"
    );
    Ok(summary)
}
