//! Startup provisioning of documents and file search stores

mod bootstrap;
mod fingerprint;
mod poll;

pub use bootstrap::Provisioner;
pub use fingerprint::{matches_remote_hash, sha256_file};
pub use poll::wait_for_operation;
