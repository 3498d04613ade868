//! Chat dispatcher: forwards a message to the model with file search attached

use std::sync::Arc;
use std::time::Instant;

use super::prompt::{error_reply, STORES_NOT_INITIALIZED, SYSTEM_INSTRUCTION};
use crate::providers::LlmProvider;
use crate::types::ChatResponse;

/// Produces grounded answers for chat requests
#[derive(Clone)]
pub struct ChatDispatcher {
    llm: Arc<dyn LlmProvider>,
    system_instruction: String,
}

impl ChatDispatcher {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
        }
    }

    /// Answer `message` using the given stores
    ///
    /// Never fails: a missing store short-circuits and provider errors come
    /// back as the response text.
    pub async fn chat(&self, message: &str, store_ids: &[Option<String>]) -> ChatResponse {
        if store_ids.iter().all(Option::is_none) {
            return ChatResponse::new(STORES_NOT_INITIALIZED);
        }

        let start = Instant::now();
        match self
            .llm
            .generate_grounded(&self.system_instruction, message, store_ids)
            .await
        {
            Ok(answer) => {
                tracing::info!(
                    "Answered via {} ({}) in {}ms",
                    self.llm.name(),
                    self.llm.model(),
                    start.elapsed().as_millis()
                );
                ChatResponse::new(answer)
            }
            Err(e) => {
                tracing::error!("Error generating content: {}", e);
                ChatResponse::new(error_reply(&e))
            }
        }
    }
}
