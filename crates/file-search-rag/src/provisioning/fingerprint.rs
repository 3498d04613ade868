//! Local vs. remote document fingerprints

use base64::Engine;
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::error::Result;

/// SHA-256 of a local file
pub async fn sha256_file(path: &Path) -> Result<[u8; 32]> {
    let data = tokio::fs::read(path).await?;
    Ok(Sha256::digest(&data).into())
}

/// Whether the API's `sha256Hash` describes `digest`
///
/// The field is base64; depending on the API surface the encoded bytes are
/// either the raw digest or its lowercase hex form, so both are accepted.
pub fn matches_remote_hash(digest: &[u8; 32], remote: &str) -> bool {
    let engine = base64::engine::general_purpose::STANDARD;
    let raw = engine.encode(digest);
    let hex_form = engine.encode(hex::encode(digest));
    remote == raw || remote == hex_form
}
