//! Idempotency key store
//!
//! Keeps at most one live key per logical operation so a retried submission carries the
//! same token the backend saw on the first attempt.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::idempotency::{DEFAULT_KEY_PREFIX, DEFAULT_TTL_HOURS};
use crate::domain::{DomainError, IdempotencyRecord, KeyValueStore};

/// Key store configuration (`idempotency` section)
#[derive(Debug, Clone, Deserialize)]
pub struct IdempotencyConfig {
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

fn default_ttl_hours() -> u64 {
    DEFAULT_TTL_HOURS
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

impl Default for IdempotencyConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            key_prefix: default_key_prefix(),
        }
    }
}

/// A namespaced entry as found in the backing store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIdempotencyKey {
    pub operation: String,
    /// `None` when the stored payload could not be parsed
    pub record: Option<IdempotencyRecord>,
    pub expired: bool,
}

/// Generate a fresh idempotency key (UUID v4)
pub fn generate_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

/// Per-operation idempotency keys over a [`KeyValueStore`]
#[derive(Debug)]
pub struct IdempotencyKeyStore<S>
where
    S: KeyValueStore + ?Sized,
{
    store: Arc<S>,
    ttl: Duration,
    prefix: String,
}

impl<S: KeyValueStore + ?Sized> Clone for IdempotencyKeyStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ttl: self.ttl,
            prefix: self.prefix.clone(),
        }
    }
}

impl<S: KeyValueStore + ?Sized> IdempotencyKeyStore<S> {
    /// Create a key store with the default TTL and prefix
    pub fn new(store: Arc<S>) -> Self {
        Self::from_config(store, &IdempotencyConfig::default())
    }

    pub fn from_config(store: Arc<S>, config: &IdempotencyConfig) -> Self {
        Self {
            store,
            ttl: Duration::hours(config.ttl_hours as i64),
            prefix: config.key_prefix.clone(),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn storage_key(&self, operation: &str) -> String {
        format!("{}{}", self.prefix, operation)
    }

    /// Generate a fresh key without storing it
    pub fn generate_idempotency_key(&self) -> String {
        generate_idempotency_key()
    }

    /// Persist `key` for `operation`, replacing any previous key
    pub fn store_idempotency_key(&self, operation: &str, key: &str) -> Result<(), DomainError> {
        let record = IdempotencyRecord::new(key);
        let payload = serde_json::to_string(&record)?;

        self.store.set(&self.storage_key(operation), &payload)?;
        debug!(operation = %operation, "Stored idempotency key");

        Ok(())
    }

    /// The live key for `operation`
    ///
    /// Absent, corrupt and expired entries all read as `None`. Storage read failures are
    /// logged and also read as `None`.
    pub fn get_idempotency_key(&self, operation: &str) -> Option<String> {
        let raw = match self.store.get(&self.storage_key(operation)) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(operation = %operation, error = %e, "Failed to read idempotency key");
                return None;
            }
        };

        let Some(record) = IdempotencyRecord::parse(&raw) else {
            warn!(operation = %operation, "Ignoring corrupt idempotency record");
            return None;
        };

        if record.is_expired_at(Utc::now(), self.ttl) {
            debug!(operation = %operation, "Idempotency key expired");
            return None;
        }

        Some(record.key)
    }

    pub fn has_valid_idempotency_key(&self, operation: &str) -> bool {
        self.get_idempotency_key(operation).is_some()
    }

    /// Remove the key for `operation`; returns whether one was stored
    pub fn clear_idempotency_key(&self, operation: &str) -> Result<bool, DomainError> {
        let removed = self.store.remove(&self.storage_key(operation))?;
        if removed {
            debug!(operation = %operation, "Cleared idempotency key");
        }
        Ok(removed)
    }

    /// Reuse the live key for `operation`, or generate and store a new one
    pub fn resolve_idempotency_key(&self, operation: &str) -> Result<String, DomainError> {
        if let Some(key) = self.get_idempotency_key(operation) {
            info!(operation = %operation, "Reusing idempotency key");
            return Ok(key);
        }

        let key = generate_idempotency_key();
        self.store_idempotency_key(operation, &key)?;
        info!(operation = %operation, "Created idempotency key");

        Ok(key)
    }

    /// Every namespaced entry, sorted by operation
    pub fn list(&self) -> Result<Vec<StoredIdempotencyKey>, DomainError> {
        let now = Utc::now();
        let mut entries = Vec::new();

        for storage_key in self.store.keys()? {
            let Some(operation) = storage_key.strip_prefix(&self.prefix) else {
                continue;
            };

            let record = self
                .store
                .get(&storage_key)?
                .and_then(|raw| IdempotencyRecord::parse(&raw));
            let expired = record
                .as_ref()
                .map(|r| r.is_expired_at(now, self.ttl))
                .unwrap_or(true);

            entries.push(StoredIdempotencyKey {
                operation: operation.to_string(),
                record,
                expired,
            });
        }

        entries.sort_by(|a, b| a.operation.cmp(&b.operation));
        Ok(entries)
    }

    /// Remove expired and corrupt namespaced entries; returns how many were removed
    pub fn clear_expired_idempotency_keys(&self) -> Result<usize, DomainError> {
        let now = Utc::now();
        let mut removed = 0;

        for storage_key in self.namespaced_keys()? {
            let stale = match self.store.get(&storage_key)? {
                Some(raw) => IdempotencyRecord::parse(&raw)
                    .map(|record| record.is_expired_at(now, self.ttl))
                    .unwrap_or(true),
                None => false,
            };

            if stale && self.store.remove(&storage_key)? {
                removed += 1;
            }
        }

        if removed > 0 {
            info!(removed = removed, "Cleared expired idempotency keys");
        }

        Ok(removed)
    }

    /// Remove every namespaced entry; returns how many were removed
    pub fn clear_all_idempotency_keys(&self) -> Result<usize, DomainError> {
        let mut removed = 0;

        for storage_key in self.namespaced_keys()? {
            if self.store.remove(&storage_key)? {
                removed += 1;
            }
        }

        info!(removed = removed, "Cleared all idempotency keys");
        Ok(removed)
    }

    fn namespaced_keys(&self) -> Result<Vec<String>, DomainError> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(&self.prefix))
            .collect())
    }
}
