//! Knowledge domains and the fixed documents that back them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One of the three fixed knowledge domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Business,
    Science,
    Story,
}

impl Domain {
    /// All domains, in registry order
    pub const ALL: [Domain; 3] = [Domain::Business, Domain::Science, Domain::Story];

    /// Registry key
    pub fn key(&self) -> &'static str {
        match self {
            Domain::Business => "business",
            Domain::Science => "science",
            Domain::Story => "story",
        }
    }

    /// Display name of the file search store for this domain
    pub fn store_display_name(&self) -> &'static str {
        match self {
            Domain::Business => "Business Store",
            Domain::Science => "Science Store",
            Domain::Story => "Story Store",
        }
    }

    /// Logical name of the uploaded document (remote name is `files/<name>`)
    pub fn document_name(&self) -> &'static str {
        match self {
            Domain::Business => "businessbook",
            Domain::Science => "sciencebook",
            Domain::Story => "storybook",
        }
    }

    /// Default local filename of the source document
    pub fn default_document_file(&self) -> &'static str {
        match self {
            Domain::Business => "businesszerotoone.pdf",
            Domain::Science => "sciencebook.pdf",
            Domain::Story => "storyharry.pdf",
        }
    }

    /// Environment variable holding the store id in static mode
    pub fn store_env_var(&self) -> &'static str {
        match self {
            Domain::Business => "BUSINESS_STORE_ID",
            Domain::Science => "SCIENCE_STORE_ID",
            Domain::Story => "STORY_STORE_ID",
        }
    }

    /// Human label used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Business => "Business Book",
            Domain::Science => "Science Book",
            Domain::Story => "Story Book",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A local document that should exist remotely under a fixed name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSpec {
    pub domain: Domain,
    /// Logical name, e.g. `businessbook`
    pub name: String,
    /// Local file path
    pub path: PathBuf,
}

impl DocumentSpec {
    /// The default document for a domain, resolved against `dir`
    pub fn for_domain(domain: Domain, dir: &Path) -> Self {
        Self {
            domain,
            name: domain.document_name().to_string(),
            path: dir.join(domain.default_document_file()),
        }
    }

    /// The three default documents, in registry order
    pub fn defaults(dir: &Path) -> Vec<Self> {
        Domain::ALL
            .iter()
            .map(|d| Self::for_domain(*d, dir))
            .collect()
    }

    /// Remote resource name, e.g. `files/businessbook`
    pub fn remote_name(&self) -> String {
        format!("files/{}", self.name)
    }
}
