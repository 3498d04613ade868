//! Bootstrap provisioning: upload-if-absent, create-if-absent, import, wait

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::fingerprint::{matches_remote_hash, sha256_file};
use super::poll::wait_for_operation;
use crate::config::ProvisioningConfig;
use crate::error::{Error, Result};
use crate::providers::FileSearchBackend;
use crate::registry::StoreRegistry;
use crate::types::{DocumentSpec, Domain, FileSearchStore, RemoteFile};

/// Makes sure every document is uploaded and imported into its domain store
pub struct Provisioner {
    backend: Arc<dyn FileSearchBackend>,
    documents: Vec<DocumentSpec>,
    poll_interval: Duration,
    detect_changes: bool,
}

impl Provisioner {
    pub fn new(backend: Arc<dyn FileSearchBackend>, documents: Vec<DocumentSpec>) -> Self {
        Self {
            backend,
            documents,
            poll_interval: Duration::from_secs(2),
            detect_changes: false,
        }
    }

    /// Provisioner for the three default documents under the configured directory
    pub fn from_config(backend: Arc<dyn FileSearchBackend>, config: &ProvisioningConfig) -> Self {
        Self::new(backend, DocumentSpec::defaults(&config.documents_dir))
            .with_poll_interval(config.poll_interval())
            .with_change_detection(config.detect_changes)
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_change_detection(mut self, enabled: bool) -> Self {
        self.detect_changes = enabled;
        self
    }

    /// Run provisioning to completion
    ///
    /// Any failure aborts; nothing is rolled back. Running it again when every
    /// file and store already exists uploads and creates nothing.
    pub async fn run(&self) -> Result<StoreRegistry> {
        tracing::info!(
            "Provisioning {} documents via {}",
            self.documents.len(),
            self.backend.name()
        );

        let files = self.ensure_files().await?;
        let stores = self.ensure_stores().await?;

        tracing::info!("Importing files into stores...");
        let mut operations = Vec::with_capacity(self.documents.len());
        for doc in &self.documents {
            let (file, store) = match (files.get(&doc.domain), stores.get(&doc.domain)) {
                (Some(file), Some(store)) => (file, store),
                _ => {
                    return Err(Error::provisioning(format!(
                        "No file or store resolved for domain {}",
                        doc.domain
                    )))
                }
            };
            let operation = self.backend.import_file(&store.name, &file.name).await?;
            tracing::debug!(
                "Import of {} into {} started: {}",
                file.name,
                store.name,
                operation.name
            );
            operations.push(operation);
        }

        // Sequential: each import is waited on fully before the next one
        tracing::info!("Waiting for imports to complete...");
        for operation in operations {
            wait_for_operation(self.backend.as_ref(), operation, self.poll_interval).await?;
        }

        let id = |domain: Domain| stores.get(&domain).map(|s| s.name.clone());
        let registry = StoreRegistry::new(
            id(Domain::Business),
            id(Domain::Science),
            id(Domain::Story),
        );

        tracing::info!("Provisioning complete");
        Ok(registry)
    }

    /// Upload each document whose remote name is not listed yet
    async fn ensure_files(&self) -> Result<HashMap<Domain, RemoteFile>> {
        let existing: HashMap<String, RemoteFile> = self
            .backend
            .list_files()
            .await?
            .into_iter()
            .map(|f| (f.name.clone(), f))
            .collect();

        let mut resolved = HashMap::new();
        for doc in &self.documents {
            let file = match existing.get(&doc.remote_name()) {
                Some(file) => {
                    tracing::info!("Found existing {}: {}", doc.domain.label(), file.name);
                    if self.detect_changes {
                        self.warn_if_changed(doc, file).await;
                    }
                    file.clone()
                }
                None => {
                    let file = self.backend.upload_file(&doc.path, &doc.name).await?;
                    tracing::info!("Uploaded {}: {}", doc.domain.label(), file.name);
                    file
                }
            };
            resolved.insert(doc.domain, file);
        }

        Ok(resolved)
    }

    /// Create each domain store whose display name is not listed yet
    async fn ensure_stores(&self) -> Result<HashMap<Domain, FileSearchStore>> {
        let existing: HashMap<String, FileSearchStore> = self
            .backend
            .list_stores()
            .await?
            .into_iter()
            .filter_map(|s| s.display_name.clone().map(|name| (name, s)))
            .collect();

        let mut resolved = HashMap::new();
        for doc in &self.documents {
            let display_name = doc.domain.store_display_name();
            let store = match existing.get(display_name) {
                Some(store) => {
                    tracing::info!("Found existing {}: {}", display_name, store.name);
                    store.clone()
                }
                None => {
                    let store = self.backend.create_store(display_name).await?;
                    tracing::info!("Created {}: {}", display_name, store.name);
                    store
                }
            };
            resolved.insert(doc.domain, store);
        }

        Ok(resolved)
    }

    /// The remote copy is kept either way; this only reports drift
    ///
    /// Returns true when the local file is known to differ.
    async fn warn_if_changed(&self, doc: &DocumentSpec, file: &RemoteFile) -> bool {
        let Some(remote_hash) = file.sha256_hash.as_deref() else {
            tracing::debug!("{} has no remote hash, skipping change check", file.name);
            return false;
        };

        match sha256_file(&doc.path).await {
            Ok(digest) if !matches_remote_hash(&digest, remote_hash) => {
                tracing::warn!(
                    "{} differs from uploaded {}; the remote copy stays in use",
                    doc.path.display(),
                    file.name
                );
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::warn!("Cannot hash {}: {}", doc.path.display(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;
    use base64::Engine;
    use std::path::Path;

    fn provisioner(backend: Arc<FakeBackend>) -> Provisioner {
        Provisioner::new(backend, DocumentSpec::defaults(Path::new("/docs")))
            .with_poll_interval(Duration::from_millis(1))
    }

    fn seed_everything(backend: &FakeBackend) {
        backend.add_file("files/businessbook", None);
        backend.add_file("files/sciencebook", None);
        backend.add_file("files/storybook", None);
        backend.add_store("fileSearchStores/biz", "Business Store");
        backend.add_store("fileSearchStores/sci", "Science Store");
        backend.add_store("fileSearchStores/sto", "Story Store");
    }

    #[tokio::test]
    async fn test_fresh_provisioning_creates_everything() {
        let backend = Arc::new(FakeBackend::with_pending_polls(1));
        let registry = provisioner(Arc::clone(&backend)).run().await.unwrap();

        assert_eq!(
            *backend.uploads.lock(),
            vec!["businessbook", "sciencebook", "storybook"]
        );
        assert_eq!(
            *backend.creates.lock(),
            vec!["Business Store", "Science Store", "Story Store"]
        );
        assert_eq!(registry.initialized_count(), 3);
        let pair = |domain: Domain, file: &str| {
            (registry.get(domain).unwrap().to_string(), file.to_string())
        };
        assert_eq!(
            *backend.imports.lock(),
            vec![
                pair(Domain::Business, "files/businessbook"),
                pair(Domain::Science, "files/sciencebook"),
                pair(Domain::Story, "files/storybook"),
            ]
        );
    }

    #[tokio::test]
    async fn test_rerun_reuses_existing_resources() {
        let backend = Arc::new(FakeBackend::default());
        seed_everything(&backend);

        let registry = provisioner(Arc::clone(&backend)).run().await.unwrap();

        assert!(backend.uploads.lock().is_empty());
        assert!(backend.creates.lock().is_empty());
        assert_eq!(
            registry,
            StoreRegistry::new(
                Some("fileSearchStores/biz".to_string()),
                Some("fileSearchStores/sci".to_string()),
                Some("fileSearchStores/sto".to_string()),
            )
        );
        // Imports are still submitted for every pair
        assert_eq!(backend.imports.lock().len(), 3);
    }

    #[tokio::test]
    async fn test_partial_state_only_fills_gaps() {
        let backend = Arc::new(FakeBackend::default());
        backend.add_file("files/sciencebook", None);
        backend.add_store("fileSearchStores/sto", "Story Store");
        // Display names must match exactly
        backend.add_store("fileSearchStores/x", "business store");

        let registry = provisioner(Arc::clone(&backend)).run().await.unwrap();

        assert_eq!(*backend.uploads.lock(), vec!["businessbook", "storybook"]);
        assert_eq!(*backend.creates.lock(), vec!["Business Store", "Science Store"]);
        assert_eq!(registry.get(Domain::Story), Some("fileSearchStores/sto"));
        assert_ne!(registry.get(Domain::Business), Some("fileSearchStores/x"));
    }

    #[tokio::test]
    async fn test_waits_for_every_import() {
        let backend = Arc::new(FakeBackend::with_pending_polls(2));
        seed_everything(&backend);

        provisioner(Arc::clone(&backend)).run().await.unwrap();

        let polls = backend.polls.lock();
        assert_eq!(polls.len(), 3);
        assert!(polls.values().all(|count| *count == 3));
    }

    #[tokio::test]
    async fn test_create_failure_aborts() {
        let backend = Arc::new(FakeBackend {
            fail_create: true,
            ..Default::default()
        });
        backend.add_file("files/businessbook", None);
        backend.add_file("files/sciencebook", None);
        backend.add_file("files/storybook", None);

        let err = provisioner(Arc::clone(&backend)).run().await.unwrap_err();
        assert!(matches!(err, Error::Provider { status: 403, .. }));
        assert!(backend.imports.lock().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_aborts() {
        let backend = Arc::new(FakeBackend {
            fail_list: true,
            ..Default::default()
        });

        let err = provisioner(Arc::clone(&backend)).run().await.unwrap_err();
        assert!(matches!(err, Error::Provider { status: 500, .. }));
        assert!(backend.uploads.lock().is_empty());
        assert!(backend.creates.lock().is_empty());
        assert!(backend.imports.lock().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_aborts() {
        let backend = Arc::new(FakeBackend {
            fail_upload: true,
            ..Default::default()
        });

        let err = provisioner(Arc::clone(&backend)).run().await.unwrap_err();
        assert!(matches!(err, Error::Provider { status: 413, .. }));
        assert!(backend.creates.lock().is_empty());
        assert!(backend.imports.lock().is_empty());
    }

    #[tokio::test]
    async fn test_import_failure_aborts() {
        let backend = Arc::new(FakeBackend {
            fail_import: true,
            ..Default::default()
        });
        seed_everything(&backend);

        let err = provisioner(Arc::clone(&backend)).run().await.unwrap_err();
        assert!(matches!(err, Error::Provider { status: 400, .. }));
        assert!(backend.polls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_changed_document_is_not_reuploaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("businesszerotoone.pdf"), b"edited").unwrap();
        std::fs::write(dir.path().join("sciencebook.pdf"), b"unchanged").unwrap();

        let backend = Arc::new(FakeBackend::default());
        seed_everything(&backend);
        let unchanged = sha256_file(&dir.path().join("sciencebook.pdf")).await.unwrap();
        {
            let engine = base64::engine::general_purpose::STANDARD;
            let mut files = backend.files.lock();
            files[0].sha256_hash = Some(engine.encode(b"stale"));
            files[1].sha256_hash = Some(engine.encode(unchanged));
        }

        let provisioner = Provisioner::new(backend.clone(), DocumentSpec::defaults(dir.path()))
            .with_poll_interval(Duration::from_millis(1))
            .with_change_detection(true);

        let seeded = backend.files.lock().clone();
        let docs = &provisioner.documents;
        assert!(provisioner.warn_if_changed(&docs[0], &seeded[0]).await);
        assert!(!provisioner.warn_if_changed(&docs[1], &seeded[1]).await);
        // No remote hash: nothing to compare
        assert!(!provisioner.warn_if_changed(&docs[2], &seeded[2]).await);

        provisioner.run().await.unwrap();
        assert!(backend.uploads.lock().is_empty());
    }
}
