// AI implementation using Google Gemini
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rig::completion::Prompt;
use rig::providers::gemini;

use super::{BaseAI, GEMINI_FLASH};

/// Gemini implementation of AI capabilities
#[derive(Clone)]
pub struct GeminiClient {
    client: gemini::Client,
}

impl GeminiClient {
    pub fn new(api_key: &str) -> Self {
        let client = gemini::Client::new(api_key);
        Self { client }
    }
}

#[async_trait]
impl BaseAI for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        tracing::debug!(
            prompt_length = prompt.len(),
            model = GEMINI_FLASH,
            "Calling Gemini API"
        );

        let agent = self
            .client
            .agent(GEMINI_FLASH)
            .preamble("You are a helpful assistant.")
            .max_tokens(2048)
            .build();

        let response = agent
            .prompt(prompt)
            .await
            .context("Gemini completion failed")?;

        tracing::debug!(response_length = response.len(), "Gemini reply received");
        Ok(response)
    }
}
