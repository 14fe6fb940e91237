use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
}

/// Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    tracing::debug!("Health check request");
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
