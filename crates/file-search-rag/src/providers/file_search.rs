//! File search backend trait: files, stores and import operations

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::types::{FileSearchStore, Operation, RemoteFile};

/// Remote calls needed to provision documents into file search stores
///
/// Implementations:
/// - `GeminiClient`: Gemini API Files + File Search Stores endpoints
#[async_trait]
pub trait FileSearchBackend: Send + Sync {
    /// List all uploaded files
    async fn list_files(&self) -> Result<Vec<RemoteFile>>;

    /// Upload a local file under the given logical name (`files/<name>`)
    async fn upload_file(&self, path: &Path, name: &str) -> Result<RemoteFile>;

    /// List all file search stores
    async fn list_stores(&self) -> Result<Vec<FileSearchStore>>;

    /// Create a file search store
    async fn create_store(&self, display_name: &str) -> Result<FileSearchStore>;

    /// Start importing an uploaded file into a store
    async fn import_file(&self, store_name: &str, file_name: &str) -> Result<Operation>;

    /// Re-fetch the state of an operation
    async fn get_operation(&self, operation_name: &str) -> Result<Operation>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
