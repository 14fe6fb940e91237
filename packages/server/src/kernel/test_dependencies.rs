//! Test doubles for kernel dependencies.
//!
//! `MockAI` scripts oracle replies for unit and integration tests; it
//! lives outside `#[cfg(test)]` so the `tests/` suite can use it too.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::BaseAI;

/// Mock oracle returning scripted replies in order.
///
/// When the script runs out the last reply repeats, so a single-reply
/// mock behaves like a fixed function. An empty script fails every call.
#[derive(Default)]
pub struct MockAI {
    replies: Arc<Mutex<VecDeque<String>>>,
    last: Arc<Mutex<Option<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a reply (builder pattern).
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(reply.into());
        self
    }

    /// Make every call fail (builder pattern).
    pub fn failing(self) -> Self {
        *self.fail.lock().unwrap() = true;
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl Clone for MockAI {
    fn clone(&self) -> Self {
        Self {
            replies: Arc::clone(&self.replies),
            last: Arc::clone(&self.last),
            prompts: Arc::clone(&self.prompts),
            fail: Arc::clone(&self.fail),
        }
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if *self.fail.lock().unwrap() {
            return Err(anyhow!("mock oracle failure"));
        }

        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            *self.last.lock().unwrap() = Some(reply.clone());
            return Ok(reply);
        }

        self.last
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow!("mock oracle has no scripted reply"))
    }
}
