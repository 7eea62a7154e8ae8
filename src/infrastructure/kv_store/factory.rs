//! Key-value store factory for runtime selection

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{DomainError, KeyValueStore};

use super::file::FileKeyValueStore;
use super::in_memory::InMemoryKeyValueStore;

const DEFAULT_STORE_PATH: &str = ".cricket-registration/state.json";

/// Supported store backends
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KvStoreType {
    /// Process-local map
    #[default]
    InMemory,
    /// JSON file on disk
    File,
}

impl std::fmt::Display for KvStoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KvStoreType::InMemory => write!(f, "in_memory"),
            KvStoreType::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for KvStoreType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(KvStoreType::InMemory),
            "file" => Ok(KvStoreType::File),
            _ => Err(DomainError::configuration(format!(
                "Unknown store type: {}. Valid types: in_memory, file",
                s
            ))),
        }
    }
}

/// Configuration for the store factory (`storage` section)
#[derive(Debug, Clone, Deserialize)]
pub struct KvStoreConfig {
    #[serde(default)]
    pub store_type: KvStoreType,
    /// File path (file backend only)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for KvStoreConfig {
    fn default() -> Self {
        Self {
            store_type: KvStoreType::InMemory,
            path: None,
        }
    }
}

impl KvStoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            store_type: KvStoreType::File,
            path: Some(path.into()),
        }
    }
}

/// Factory for creating store instances
#[derive(Debug, Default)]
pub struct KvStoreFactory;

impl KvStoreFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates a store based on configuration
    pub fn create(&self, config: &KvStoreConfig) -> Result<Arc<dyn KeyValueStore>, DomainError> {
        match config.store_type {
            KvStoreType::InMemory => Ok(Arc::new(InMemoryKeyValueStore::new())),
            KvStoreType::File => {
                let path = config
                    .path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

                Ok(Arc::new(FileKeyValueStore::open(path)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_type_from_str() {
        assert_eq!("in_memory".parse::<KvStoreType>().unwrap(), KvStoreType::InMemory);
        assert_eq!("memory".parse::<KvStoreType>().unwrap(), KvStoreType::InMemory);
        assert_eq!("FILE".parse::<KvStoreType>().unwrap(), KvStoreType::File);
        assert!("redis".parse::<KvStoreType>().is_err());
    }

    #[test]
    fn test_store_type_display() {
        assert_eq!(KvStoreType::InMemory.to_string(), "in_memory");
        assert_eq!(KvStoreType::File.to_string(), "file");
    }

    #[test]
    fn test_factory_create_in_memory() {
        let store = KvStoreFactory::new().create(&KvStoreConfig::in_memory()).unwrap();

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_factory_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = KvStoreConfig::file(dir.path().join("kv.json"));

        let store = KvStoreFactory::new().create(&config).unwrap();
        store.set("k", "v").unwrap();

        assert!(dir.path().join("kv.json").exists());
    }
}
