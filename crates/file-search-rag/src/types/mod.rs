//! Core types for the file search backend

pub mod chat;
pub mod domain;
pub mod remote;

pub use chat::{ChatRequest, ChatResponse};
pub use domain::{DocumentSpec, Domain};
pub use remote::{FileSearchStore, Operation, OperationStatus, RemoteFile};
