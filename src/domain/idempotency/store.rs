//! Key-value storage seam

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Scoped key-value storage with synchronous access and no built-in TTL
///
/// Expiry is the caller's concern; implementations only hold strings.
#[cfg_attr(test, automock)]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Reads a raw value
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Writes a raw value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Removes a value, returning whether it existed
    fn remove(&self, key: &str) -> Result<bool, DomainError>;

    /// Lists every stored key
    fn keys(&self) -> Result<Vec<String>, DomainError>;
}
