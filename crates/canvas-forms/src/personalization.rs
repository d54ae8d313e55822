//! Personalization context seam
//!
//! The engine only ever sets quirks on the visitor's context. Everything else
//! about personalization (signals, audiences) lives outside this crate.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Payload of a context update, `{ "quirks": { name: value } }`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextUpdate {
    pub quirks: BTreeMap<String, String>,
}

impl ContextUpdate {
    pub fn quirk(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut quirks = BTreeMap::new();
        quirks.insert(name.into(), value.into());
        Self { quirks }
    }
}

#[derive(Error, Debug)]
pub enum PersonalizationError {
    #[error("context update rejected: {0}")]
    Rejected(String),
}

/// Visitor personalization context
pub trait PersonalizationContext: Send + Sync {
    fn update(&self, update: ContextUpdate) -> Result<(), PersonalizationError>;
}

/// Session-scoped quirk map
#[derive(Debug, Default)]
pub struct InMemoryQuirks {
    quirks: RwLock<BTreeMap<String, String>>,
}

impl InMemoryQuirks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.quirks.read().get(name).cloned()
    }

    pub fn all(&self) -> BTreeMap<String, String> {
        self.quirks.read().clone()
    }
}

impl PersonalizationContext for InMemoryQuirks {
    fn update(&self, update: ContextUpdate) -> Result<(), PersonalizationError> {
        self.quirks.write().extend(update.quirks);
        Ok(())
    }
}
