//! Persisted idempotency record

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Default validity window of a stored key
pub const DEFAULT_TTL_HOURS: u64 = 24;

/// Default namespace prefix for stored records
pub const DEFAULT_KEY_PREFIX: &str = "idempotency_key_";

/// Stored shape: `{ "key": "<uuid v4>", "timestamp": <epoch millis> }`
///
/// The operation name is carried by the storage key, not the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdempotencyRecord {
    pub key: String,
    pub timestamp: i64,
}

impl IdempotencyRecord {
    /// Creates a record stamped with the current time
    pub fn new(key: impl Into<String>) -> Self {
        Self::created_at(key, Utc::now())
    }

    pub fn created_at(key: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            timestamp: created_at.timestamp_millis(),
        }
    }

    /// Parses a stored payload; any malformed payload yields `None`
    pub fn parse(raw: &str) -> Option<Self> {
        let record: Self = serde_json::from_str(raw).ok()?;

        if record.key.is_empty() {
            return None;
        }

        Some(record)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    /// A record is expired once it is strictly older than `ttl`
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.timestamp_millis() - self.timestamp > ttl.num_milliseconds()
    }
}
