//! Application state for the chat server

use std::sync::Arc;

use crate::generation::ChatDispatcher;
use crate::providers::LlmProvider;
use crate::registry::StoreRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Store ids, fixed for the life of the process
    registry: StoreRegistry,
    /// Grounded chat dispatcher
    dispatcher: ChatDispatcher,
}

impl AppState {
    /// Create new application state
    pub fn new(registry: StoreRegistry, llm: Arc<dyn LlmProvider>) -> Self {
        tracing::info!(
            "Chat state ready ({} of 3 stores initialized, llm: {} / {})",
            registry.initialized_count(),
            llm.name(),
            llm.model()
        );

        Self {
            inner: Arc::new(AppStateInner {
                registry,
                dispatcher: ChatDispatcher::new(llm),
            }),
        }
    }

    /// Get the store registry
    pub fn registry(&self) -> &StoreRegistry {
        &self.inner.registry
    }

    /// Get the chat dispatcher
    pub fn dispatcher(&self) -> &ChatDispatcher {
        &self.inner.dispatcher
    }
}
