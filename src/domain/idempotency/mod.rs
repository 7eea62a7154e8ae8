//! Idempotency domain - Operation tokens and the storage seam they persist through

mod record;
mod store;

pub use record::{IdempotencyRecord, DEFAULT_KEY_PREFIX, DEFAULT_TTL_HOURS};
pub use store::KeyValueStore;

#[cfg(test)]
pub use store::MockKeyValueStore;
