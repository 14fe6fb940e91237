//! Recommendation engine.
//!
//! Turns a free-text (or job-posting-URL) query plus a catalog snapshot
//! into at most [`MAX_RECOMMENDATIONS`] assessment records, selected by
//! the oracle via transient catalog indices.

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use extraction::Ingestor;

use super::parse::{parse_reply_ids, ParsedIds};
use crate::domains::catalog::Assessment;
use crate::kernel::BaseAI;

/// Upper bound on recommendations per query.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Recommendation request body: free text, a URL to extract text from,
/// or both (text wins only when the URL is absent).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryInput {
    pub text: Option<String>,
    pub url: Option<String>,
}

/// Failures on the recommendation path. Unlike the scraping path these
/// are escalated: a request that cannot produce any answer fails.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("either text or url must be provided")]
    MissingInput,

    #[error("failed to fetch or parse URL: {0}")]
    UrlFetch(String),

    #[error("AI model error: {0}")]
    Oracle(#[source] anyhow::Error),

    #[error("model reply contained no assessment ids")]
    NoIdsFound,
}

/// Matches queries against the catalog via the oracle.
pub struct RecommendationEngine {
    ai: Arc<dyn BaseAI>,
    ingestor: Arc<dyn Ingestor>,
}

impl RecommendationEngine {
    pub fn new(ai: Arc<dyn BaseAI>, ingestor: Arc<dyn Ingestor>) -> Self {
        Self { ai, ingestor }
    }

    /// Recommend catalog entries for resolved query text.
    ///
    /// The result is value copies from `catalog`, in ascending
    /// transient-index order, at most [`MAX_RECOMMENDATIONS`] long. An
    /// empty result is valid: it means the oracle answered with only
    /// out-of-range indices.
    pub async fn recommend(
        &self,
        query_text: &str,
        catalog: &[Assessment],
    ) -> Result<Vec<Assessment>, RecommendError> {
        let prompt = build_prompt(query_text, catalog);
        let reply = self
            .ai
            .complete(&prompt)
            .await
            .map_err(RecommendError::Oracle)?;

        let ids = match parse_reply_ids(&reply, catalog.len(), MAX_RECOMMENDATIONS) {
            ParsedIds::Found(ids) => ids,
            ParsedIds::NoneFound => return Err(RecommendError::NoIdsFound),
        };

        let recommendations: Vec<Assessment> =
            ids.into_iter().map(|id| catalog[id].clone()).collect();
        info!(count = recommendations.len(), "Generated recommendations");
        Ok(recommendations)
    }

    /// Resolve the query to plain text: extract the page when a URL is
    /// given, else use the text field. Whitespace-only input is unusable.
    ///
    /// Runs before any catalog work so an unusable request is rejected
    /// without triggering a refresh.
    pub async fn resolve_query_text(&self, query: &QueryInput) -> Result<String, RecommendError> {
        if let Some(url) = query.url.as_deref().filter(|u| !u.trim().is_empty()) {
            let page = self
                .ingestor
                .extract(url)
                .await
                .map_err(|e| RecommendError::UrlFetch(e.to_string()))?;
            debug!(url = %url, text_length = page.text.len(), "Resolved query from URL");
            return Ok(page.text);
        }

        match query.text.as_deref() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(RecommendError::MissingInput),
        }
    }
}

/// Build the classification prompt: the query text plus every catalog
/// entry's transient index, name, and test type.
fn build_prompt(query_text: &str, catalog: &[Assessment]) -> String {
    let id_list = (0..catalog.len())
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let listing = json!(catalog
        .iter()
        .enumerate()
        .map(|(i, a)| json!({"id": i, "name": a.name, "type": a.test_type}))
        .collect::<Vec<_>>());

    format!(
        "You are an assessment recommendation system for SHL. Based on the following job description or query, \
         recommend the most relevant assessments from SHL's catalog.\n\
         \n\
         Here is the job description or query:\n\
         {query_text}\n\
         \n\
         Analyze the skills, experience, and requirements mentioned in the text. \
         Select at most {MAX_RECOMMENDATIONS} most relevant assessments from the SHL product catalog.\n\
         Return your answer as a list of assessment IDs ONLY, nothing else.\n\
         Choose from the following assessment IDs: {id_list}\n\
         \n\
         SHL Assessment List:\n\
         {listing}"
    )
}
