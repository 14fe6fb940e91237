//! HTTP route handlers.

pub mod assessments;
pub mod health;
pub mod recommend;

use serde::Serialize;

/// JSON error body: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

pub use assessments::{assessments_handler, refresh_assessments_handler};
pub use health::health_handler;
pub use recommend::recommend_handler;
