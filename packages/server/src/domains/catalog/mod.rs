//! Catalog domain: acquisition, caching, and repair of the assessment
//! product catalog.

pub mod fetcher;
pub mod models;
pub mod names;
pub mod normalize;
pub mod repair;
pub mod service;
pub mod store;

pub use fetcher::{CatalogFetcher, FetchFailure, FetchOutcome};
pub use models::{default_catalog, Assessment, CacheEnvelope, UNNAMED_PLACEHOLDER};
pub use normalize::normalize;
pub use store::{CacheState, CatalogStore, FileCatalogStore, MemoryCatalogStore};
