//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use extraction::Ingestor;

use crate::domains::catalog::{CatalogFetcher, CatalogStore};
use crate::domains::recommend::RecommendationEngine;
use crate::kernel::BaseAI;
use crate::server::routes::{
    assessments_handler, health_handler, recommend_handler, refresh_assessments_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub fetcher: Arc<CatalogFetcher>,
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        ai: Arc<dyn BaseAI>,
        ingestor: Arc<dyn Ingestor>,
        catalog_seed_url: String,
    ) -> Self {
        let fetcher = Arc::new(CatalogFetcher::new(
            ingestor.clone(),
            ai.clone(),
            catalog_seed_url,
        ));
        let engine = Arc::new(RecommendationEngine::new(ai, ingestor));
        Self {
            store,
            fetcher,
            engine,
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/recommend", post(recommend_handler))
        .route("/assessments", get(assessments_handler))
        .route("/refresh-assessments", get(refresh_assessments_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
