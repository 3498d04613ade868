//! Resources owned by the Gemini API (files, stores, long-running operations)

use serde::{Deserialize, Serialize};

/// An uploaded file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    /// Resource name, e.g. `files/businessbook`
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Serialized as a string by the API (int64)
    #[serde(default)]
    pub size_bytes: Option<String>,
    /// Base64 encoded SHA-256 of the uploaded bytes
    #[serde(default)]
    pub sha256_hash: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// A file search store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSearchStore {
    /// Resource name, e.g. `fileSearchStores/abc123`
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
}

/// Status attached to a failed operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationStatus {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Handle of a long-running import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<OperationStatus>,
}

impl Operation {
    /// Error message if the operation finished unsuccessfully
    pub fn failure(&self) -> Option<String> {
        self.error.as_ref().map(|status| {
            format!(
                "{} (code {})",
                status.message.as_deref().unwrap_or("unknown error"),
                status.code.unwrap_or_default()
            )
        })
    }
}
