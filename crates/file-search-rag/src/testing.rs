//! In-memory providers for unit tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::providers::{FileSearchBackend, LlmProvider};
use crate::types::{FileSearchStore, Operation, OperationStatus, RemoteFile};

/// LLM that returns a canned answer or a canned failure
pub struct FakeLlm {
    answer: std::result::Result<String, String>,
    pub calls: Mutex<Vec<(String, Vec<Option<String>>)>>,
}

impl FakeLlm {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    async fn generate_grounded(
        &self,
        _system_instruction: &str,
        prompt: &str,
        store_names: &[Option<String>],
    ) -> Result<String> {
        self.calls
            .lock()
            .push((prompt.to_string(), store_names.to_vec()));
        self.answer.clone().map_err(Error::llm)
    }

    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

/// File search backend holding files and stores in memory
#[derive(Default)]
pub struct FakeBackend {
    pub files: Mutex<Vec<RemoteFile>>,
    pub stores: Mutex<Vec<FileSearchStore>>,
    pub uploads: Mutex<Vec<String>>,
    pub creates: Mutex<Vec<String>>,
    pub imports: Mutex<Vec<(String, String)>>,
    /// Polls per operation, by name
    pub polls: Mutex<HashMap<String, usize>>,
    /// Polls answered "not done" before an operation completes
    pub pending_polls: usize,
    /// Error message attached to completed operations
    pub import_error: Option<String>,
    /// Fail every call to `list_files`
    pub fail_list: bool,
    /// Fail every call to `upload_file`
    pub fail_upload: bool,
    /// Fail every call to `create_store`
    pub fail_create: bool,
    /// Fail every call to `import_file`
    pub fail_import: bool,
}

impl FakeBackend {
    pub fn with_pending_polls(pending_polls: usize) -> Self {
        Self {
            pending_polls,
            ..Default::default()
        }
    }

    pub fn add_file(&self, name: &str, sha256_hash: Option<&str>) {
        self.files.lock().push(RemoteFile {
            name: name.to_string(),
            sha256_hash: sha256_hash.map(str::to_string),
            ..Default::default()
        });
    }

    pub fn add_store(&self, name: &str, display_name: &str) {
        self.stores.lock().push(FileSearchStore {
            name: name.to_string(),
            display_name: Some(display_name.to_string()),
            ..Default::default()
        });
    }
}

#[async_trait]
impl FileSearchBackend for FakeBackend {
    async fn list_files(&self) -> Result<Vec<RemoteFile>> {
        if self.fail_list {
            return Err(Error::provider(500, "backend unavailable"));
        }
        Ok(self.files.lock().clone())
    }

    async fn upload_file(&self, path: &Path, name: &str) -> Result<RemoteFile> {
        if self.fail_upload {
            return Err(Error::provider(413, "file too large"));
        }
        let file = RemoteFile {
            name: format!("files/{}", name),
            display_name: path.file_name().map(|n| n.to_string_lossy().to_string()),
            ..Default::default()
        };
        self.uploads.lock().push(name.to_string());
        self.files.lock().push(file.clone());
        Ok(file)
    }

    async fn list_stores(&self) -> Result<Vec<FileSearchStore>> {
        Ok(self.stores.lock().clone())
    }

    async fn create_store(&self, display_name: &str) -> Result<FileSearchStore> {
        if self.fail_create {
            return Err(Error::provider(403, "permission denied"));
        }
        let mut stores = self.stores.lock();
        let store = FileSearchStore {
            name: format!("fileSearchStores/created-{}", stores.len()),
            display_name: Some(display_name.to_string()),
            ..Default::default()
        };
        stores.push(store.clone());
        self.creates.lock().push(display_name.to_string());
        Ok(store)
    }

    async fn import_file(&self, store_name: &str, file_name: &str) -> Result<Operation> {
        if self.fail_import {
            return Err(Error::provider(400, "unsupported file"));
        }
        let mut imports = self.imports.lock();
        imports.push((store_name.to_string(), file_name.to_string()));
        Ok(Operation {
            name: format!("{}/operations/op-{}", store_name, imports.len()),
            done: false,
            error: None,
        })
    }

    async fn get_operation(&self, operation_name: &str) -> Result<Operation> {
        let mut polls = self.polls.lock();
        let count = polls.entry(operation_name.to_string()).or_insert(0);
        *count += 1;
        let done = *count > self.pending_polls;
        Ok(Operation {
            name: operation_name.to_string(),
            done,
            error: match (&self.import_error, done) {
                (Some(message), true) => Some(OperationStatus {
                    code: Some(13),
                    message: Some(message.clone()),
                }),
                _ => None,
            },
        })
    }

    fn name(&self) -> &str {
        "fake"
    }
}
