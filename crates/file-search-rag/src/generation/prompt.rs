//! Fixed prompt text and canned replies

/// System instruction sent with every grounded chat
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant. You have access to a knowledge base of documents. \
Always use the file_search tool to find relevant information to answer the user's question. \
If the answer is not found in the documents, say so.";

/// Reply when no target store has an id
pub const STORES_NOT_INITIALIZED: &str = "Stores not initialized.";

/// Reply when generation fails
pub fn error_reply(error: &impl std::fmt::Display) -> String {
    format!("Error generating response: {}", error)
}
