//! LLM provider trait for grounded answer generation

use async_trait::async_trait;
use crate::error::Result;

/// Trait for answer generation backed by file search
///
/// Implementations:
/// - `GeminiClient`: Gemini API `generateContent` with the `fileSearch` tool
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate an answer to `prompt`, letting the model search `store_names`
    ///
    /// `store_names` is forwarded as given, including `None` entries.
    async fn generate_grounded(
        &self,
        system_instruction: &str,
        prompt: &str,
        store_names: &[Option<String>],
    ) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
