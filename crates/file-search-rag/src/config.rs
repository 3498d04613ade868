//! Configuration for the file search backend

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::Domain;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini API configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Startup provisioning configuration
    #[serde(default)]
    pub provisioning: ProvisioningConfig,
    /// Store ids used in static mode
    #[serde(default)]
    pub stores: StaticStoresConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("GOOGLE_API_KEY")) {
            self.gemini.api_key = Some(key);
        }
        if let Some(model) = get("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Some(url) = get("GEMINI_BASE_URL") {
            self.gemini.base_url = url;
        }
        if let Some(host) = get("RAG_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("RAG_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid RAG_PORT '{}': {}", port, e)))?;
        }
        if let Some(mode) = get("RAG_MODE") {
            self.provisioning.mode = mode.parse()?;
        }
        if let Some(dir) = get("RAG_DOCUMENTS_DIR") {
            self.provisioning.documents_dir = PathBuf::from(dir);
        }
        for domain in Domain::ALL {
            if let Some(id) = get(domain.store_env_var()) {
                self.stores.set(domain, Some(id));
            }
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (falls back to GEMINI_API_KEY / GOOGLE_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Generation model
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds, unset means requests may wait forever
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: None,
        }
    }
}

/// How store ids are obtained at startup
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProvisioningMode {
    /// Upload documents, create stores and import before serving
    #[default]
    Bootstrap,
    /// Read store ids from configuration only
    Static,
}

impl FromStr for ProvisioningMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bootstrap" => Ok(Self::Bootstrap),
            "static" => Ok(Self::Static),
            other => Err(Error::Config(format!(
                "Unknown provisioning mode '{}' (expected bootstrap or static)",
                other
            ))),
        }
    }
}

/// Startup provisioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    #[serde(default)]
    pub mode: ProvisioningMode,
    /// Directory holding the three source documents
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,
    /// Delay between import status checks (default: 2s)
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Warn when a local document no longer matches its uploaded copy
    #[serde(default)]
    pub detect_changes: bool,
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_poll_interval_secs() -> u64 {
    2
}

impl ProvisioningConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            mode: ProvisioningMode::default(),
            documents_dir: default_documents_dir(),
            poll_interval_secs: default_poll_interval_secs(),
            detect_changes: false,
        }
    }
}

/// Store ids for static mode
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaticStoresConfig {
    #[serde(default)]
    pub business: Option<String>,
    #[serde(default)]
    pub science: Option<String>,
    #[serde(default)]
    pub story: Option<String>,
}

impl StaticStoresConfig {
    pub fn get(&self, domain: Domain) -> Option<&str> {
        match domain {
            Domain::Business => self.business.as_deref(),
            Domain::Science => self.science.as_deref(),
            Domain::Story => self.story.as_deref(),
        }
    }

    pub fn set(&mut self, domain: Domain, id: Option<String>) {
        let slot = match domain {
            Domain::Business => &mut self.business,
            Domain::Science => &mut self.science,
            Domain::Story => &mut self.story,
        };
        *slot = id;
    }
}
