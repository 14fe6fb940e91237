//! Recommendation endpoint.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::domains::catalog::{service, Assessment};
use crate::domains::recommend::{QueryInput, RecommendError};
use crate::server::app::AppState;
use crate::server::routes::ErrorResponse;

#[derive(Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Assessment>,
}

/// POST /recommend - match a job description (text or URL) against the
/// catalog.
///
/// 400 when no usable input was given or the URL cannot be fetched;
/// 500 when the oracle call fails or its reply yields no ids at all.
/// An empty recommendation list is a valid 200, distinct from failure.
pub async fn recommend_handler(
    Extension(state): Extension<AppState>,
    Json(query): Json<QueryInput>,
) -> Result<Json<RecommendationResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!(
        has_text = query.text.is_some(),
        url = query.url.as_deref().unwrap_or("none"),
        "Recommendation request received"
    );

    // Validate and resolve the query before touching the catalog, so a
    // request with no usable input never triggers a refresh
    let query_text = state
        .engine
        .resolve_query_text(&query)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejecting unusable recommendation query");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
        })?;

    let catalog = service::get_or_refresh(state.store.as_ref(), &state.fetcher)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load catalog");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!("Failed to load catalog: {e}"))),
            )
        })?;

    let recommendations = state
        .engine
        .recommend(&query_text, &catalog)
        .await
        .map_err(|e| {
            let status = match &e {
                RecommendError::MissingInput | RecommendError::UrlFetch(_) => {
                    StatusCode::BAD_REQUEST
                }
                RecommendError::Oracle(_) | RecommendError::NoIdsFound => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            tracing::error!(error = %e, status = %status, "Recommendation failed");
            (status, Json(ErrorResponse::new(e.to_string())))
        })?;

    tracing::info!(count = recommendations.len(), "Returning recommendations");
    Ok(Json(RecommendationResponse { recommendations }))
}
