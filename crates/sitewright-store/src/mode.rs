//! Storage selection from configuration

use serde::{Deserialize, Serialize};
use sitewright_domain::traits::KeyedStore;
use sitewright_domain::{ContentId, StoredDocument, WebsiteContent};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{DocumentStore, SingleSlotStore, StoreError};

/// How saved documents are keyed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// One fixed key; only the latest document survives
    #[default]
    SingleSlot,
    /// One row per content id
    PerDocument,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::SingleSlot => write!(f, "single_slot"),
            StorageMode::PerDocument => write!(f, "per_document"),
        }
    }
}

/// `[storage]` configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database path (`:memory:` for a throwaway store)
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Keying mode
    #[serde(default)]
    pub mode: StorageMode,
}

fn default_path() -> PathBuf {
    PathBuf::from("sitewright.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            mode: StorageMode::default(),
        }
    }
}

/// A store chosen at runtime from [`StorageMode`]
pub enum ConfiguredStore {
    /// Single fixed key
    SingleSlot(SingleSlotStore),
    /// Keyed by id
    PerDocument(DocumentStore),
}

impl ConfiguredStore {
    /// Open the store described by `config`
    pub fn open(config: &StorageConfig) -> Result<Self, StoreError> {
        Self::open_path(&config.path, config.mode)
    }

    /// Open a store of the given mode at `path`
    pub fn open_path<P: AsRef<Path>>(path: P, mode: StorageMode) -> Result<Self, StoreError> {
        Ok(match mode {
            StorageMode::SingleSlot => ConfiguredStore::SingleSlot(SingleSlotStore::new(path)?),
            StorageMode::PerDocument => ConfiguredStore::PerDocument(DocumentStore::new(path)?),
        })
    }

    /// The mode this store was opened with
    pub fn mode(&self) -> StorageMode {
        match self {
            ConfiguredStore::SingleSlot(_) => StorageMode::SingleSlot,
            ConfiguredStore::PerDocument(_) => StorageMode::PerDocument,
        }
    }
}

impl KeyedStore for ConfiguredStore {
    type Error = StoreError;

    fn put(&mut self, id: ContentId, content: &WebsiteContent) -> Result<(), Self::Error> {
        match self {
            ConfiguredStore::SingleSlot(store) => store.put(id, content),
            ConfiguredStore::PerDocument(store) => store.put(id, content),
        }
    }

    fn get(&self, id: ContentId) -> Result<Option<StoredDocument>, Self::Error> {
        match self {
            ConfiguredStore::SingleSlot(store) => store.get(id),
            ConfiguredStore::PerDocument(store) => store.get(id),
        }
    }

    fn latest(&self) -> Result<Option<StoredDocument>, Self::Error> {
        match self {
            ConfiguredStore::SingleSlot(store) => store.latest(),
            ConfiguredStore::PerDocument(store) => store.latest(),
        }
    }
}
