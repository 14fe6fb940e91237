//! Background repair of placeholder record names.
//!
//! Runs outside the request path: re-resolves placeholder names in the
//! persisted envelope through the store's atomic `update`, timestamp
//! unchanged. The whole read-modify-write happens under the store's
//! write lock, so a refresh landing mid-repair is never overwritten by
//! a stale pre-read copy. Name resolution is pure; no oracle call
//! happens while the lock is held.

use anyhow::Result;
use tracing::info;

use super::names;
use super::store::CatalogStore;

/// Rewrite placeholder names in the persisted catalog.
///
/// Returns the number of records fixed. A missing envelope is a no-op.
pub async fn repair_unnamed(store: &dyn CatalogStore) -> Result<usize> {
    let fixed = store
        .update(Box::new(|envelope| {
            let mut fixed = 0;
            for record in &mut envelope.assessments {
                if record.is_unnamed() {
                    let name = names::resolve_from_url(&record.url, Some(&record.test_type));
                    info!(url = %record.url, name = %name, "Renamed placeholder record");
                    record.name = name;
                    fixed += 1;
                }
            }
            fixed
        }))
        .await?;

    info!(fixed = fixed, "Name repair completed");
    Ok(fixed)
}
