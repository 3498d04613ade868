//! Grounded answer generation

pub mod dispatcher;
pub mod prompt;

pub use dispatcher::ChatDispatcher;
pub use prompt::{STORES_NOT_INITIALIZED, SYSTEM_INSTRUCTION};
