//! Gemini API key authentication
//!
//! The key travels as the `x-goog-api-key` header on every request.

use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::error::{Error, Result};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// API key credentials
pub struct ApiKeyAuth {
    api_key: String,
}

impl ApiKeyAuth {
    /// Take the key from configuration
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(Self {
                api_key: key.to_string(),
            }),
            _ => Err(Error::Config(
                "Gemini API key missing: set GEMINI_API_KEY or GOOGLE_API_KEY".to_string(),
            )),
        }
    }

    /// Create HTTP client with auth headers
    ///
    /// Without a timeout a stalled request blocks its caller indefinitely.
    pub fn authorized_client(&self, timeout: Option<Duration>) -> Result<reqwest::Client> {
        let mut value = HeaderValue::from_str(&self.api_key)
            .map_err(|e| Error::Config(format!("Invalid API key: {}", e)))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, value);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
    }
}
