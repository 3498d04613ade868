//! file-search-rag: chat backend over Gemini file search stores
//!
//! On startup the three fixed documents are provisioned into their stores
//! (or store ids are read from configuration), then chat requests are
//! forwarded to Gemini with a file search tool scoped to those stores.

pub mod config;
pub mod error;
pub mod generation;
pub mod providers;
pub mod provisioning;
pub mod registry;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ProvisioningMode, RagConfig};
pub use error::{Error, Result};
pub use registry::StoreRegistry;
pub use types::{ChatRequest, ChatResponse, Domain};
