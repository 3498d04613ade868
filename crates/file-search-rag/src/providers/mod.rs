//! Provider abstractions for grounded generation and file search provisioning
//!
//! Trait-based so the dispatcher and provisioner run against in-memory fakes
//! in tests and against the Gemini API in production.

pub mod file_search;
pub mod gemini;
pub mod llm;

pub use file_search::FileSearchBackend;
pub use gemini::GeminiClient;
pub use llm::LlmProvider;
