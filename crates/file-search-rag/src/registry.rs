//! Store registry: domain -> remote file search store id
//!
//! Built once at startup and never mutated afterwards. Handlers share it
//! through `Arc` without locking.

use serde::Serialize;

use crate::config::StaticStoresConfig;
use crate::types::Domain;

/// Immutable snapshot of the store ids for each domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreRegistry {
    business: Option<String>,
    science: Option<String>,
    story: Option<String>,
}

impl StoreRegistry {
    pub fn new(business: Option<String>, science: Option<String>, story: Option<String>) -> Self {
        Self {
            business,
            science,
            story,
        }
    }

    /// Registry with no stores, every chat short-circuits
    pub fn empty() -> Self {
        Self::default()
    }

    /// Static mode: take ids straight from configuration, unvalidated
    pub fn from_static(stores: &StaticStoresConfig) -> Self {
        let id = |domain: Domain| {
            stores
                .get(domain)
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        };
        Self::new(id(Domain::Business), id(Domain::Science), id(Domain::Story))
    }

    /// Store id for one domain
    pub fn get(&self, domain: Domain) -> Option<&str> {
        match domain {
            Domain::Business => self.business.as_deref(),
            Domain::Science => self.science.as_deref(),
            Domain::Story => self.story.as_deref(),
        }
    }

    /// Ids to search for a single domain
    pub fn for_domain(&self, domain: Domain) -> Vec<Option<String>> {
        vec![self.get(domain).map(str::to_string)]
    }

    /// Ids of every domain in order business, science, story
    pub fn all(&self) -> Vec<Option<String>> {
        Domain::ALL
            .iter()
            .map(|d| self.get(*d).map(str::to_string))
            .collect()
    }

    /// Number of domains with a store id
    pub fn initialized_count(&self) -> usize {
        Domain::ALL.iter().filter(|d| self.get(**d).is_some()).count()
    }
}
