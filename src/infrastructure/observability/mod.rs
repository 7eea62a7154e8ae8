//! Observability infrastructure - Metrics

mod metrics;

pub use metrics::{record_api_request, record_retry, record_submission};
