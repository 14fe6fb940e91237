//! Catalog deduplication and name repair.
//!
//! Collapses raw fetch results into a unique-by-URL catalog, keeping the
//! first occurrence of each URL and re-resolving empty or placeholder
//! names before insertion.

use std::collections::HashSet;

use super::models::Assessment;
use super::names;

/// Deduplicate by URL (first occurrence wins) and repair unresolved
/// names. Idempotent: normalizing the output again is a no-op.
pub fn normalize(raw: Vec<Assessment>) -> Vec<Assessment> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut catalog: Vec<Assessment> = Vec::with_capacity(raw.len());

    for mut record in raw {
        if !seen_urls.insert(record.url.clone()) {
            tracing::debug!(url = %record.url, "Dropping duplicate catalog entry");
            continue;
        }

        if record.is_unnamed() {
            record.name = names::resolve_from_url(&record.url, Some(&record.test_type));
            tracing::debug!(url = %record.url, name = %record.name, "Repaired record name");
        }

        catalog.push(record);
    }

    catalog
}
