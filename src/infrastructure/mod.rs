//! Infrastructure layer - Storage backends, HTTP plumbing and the services built on them

pub mod http;
pub mod idempotency;
pub mod kv_store;
pub mod logging;
pub mod observability;
pub mod registration;
pub mod tournament;
