//! Gemini API provider
//!
//! - Files API for document upload
//! - File Search Stores for indexing and import operations
//! - `generateContent` with the `fileSearch` tool for grounded answers

mod auth;
mod client;

pub use client::GeminiClient;
