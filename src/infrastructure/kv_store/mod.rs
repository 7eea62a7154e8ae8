//! Key-value store implementations

mod factory;
mod file;
mod in_memory;

pub use factory::{KvStoreConfig, KvStoreFactory, KvStoreType};
pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
