//! Idempotency key management

mod service;

pub use service::{
    generate_idempotency_key, IdempotencyConfig, IdempotencyKeyStore, StoredIdempotencyKey,
};

/// Key store over a runtime-selected backend
pub type SharedKeyStore = IdempotencyKeyStore<dyn crate::domain::KeyValueStore>;
