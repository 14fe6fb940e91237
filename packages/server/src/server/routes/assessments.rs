//! Catalog endpoints: list (cache-backed) and forced refresh.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::domains::catalog::{repair, service, Assessment};
use crate::server::app::AppState;
use crate::server::routes::ErrorResponse;

#[derive(Serialize)]
pub struct AssessmentsResponse {
    pub assessments: Vec<Assessment>,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub status: String,
    pub count: usize,
    pub unnamed_count: usize,
}

/// GET /assessments - all catalog entries, refreshing the cache if stale.
pub async fn assessments_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<AssessmentsResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!("Request for all assessments");

    let assessments = service::get_or_refresh(state.store.as_ref(), &state.fetcher)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load catalog");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!("Failed to load catalog: {e}"))),
            )
        })?;

    Ok(Json(AssessmentsResponse { assessments }))
}

/// GET /refresh-assessments - invalidate the cache and fetch fresh data.
///
/// When placeholder names survive the refresh, a repair task is spawned
/// fire-and-forget; its outcome never affects this response.
pub async fn refresh_assessments_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<RefreshResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!("Request to refresh assessment data");

    let summary = service::force_refresh(state.store.as_ref(), &state.fetcher)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Catalog refresh failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!("Refresh failed: {e}"))),
            )
        })?;

    if summary.unnamed_count > 0 {
        tracing::warn!(
            unnamed = summary.unnamed_count,
            "Placeholder names found, scheduling background repair"
        );
        let store = state.store.clone();
        tokio::spawn(async move {
            if let Err(e) = repair::repair_unnamed(store.as_ref()).await {
                tracing::error!(error = %e, "Background name repair failed");
            }
        });
    }

    Ok(Json(RefreshResponse {
        status: "success".to_string(),
        count: summary.count,
        unnamed_count: summary.unnamed_count,
    }))
}
