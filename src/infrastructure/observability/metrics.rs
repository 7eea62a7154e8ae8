//! Client-side metrics
//!
//! Recorded through the `metrics` facade; the embedding application decides which
//! recorder (if any) is installed.

use std::time::Duration;

use metrics::{counter, histogram};
use once_cell::sync::Lazy;
use regex::Regex;

static UUID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .unwrap()
});

static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

/// Record one finished attempt
///
/// `outcome` is `success` or the classified error code.
pub fn record_api_request(method: &str, path: &str, outcome: &str, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("outcome", outcome.to_string()),
    ];

    counter!("api_requests_total", &labels).increment(1);
    histogram!("api_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Record a retry scheduled after a retryable failure
pub fn record_retry(path: &str, error_code: &str) {
    let labels = [
        ("path", sanitize_path(path)),
        ("error_code", error_code.to_string()),
    ];

    counter!("api_retries_total", &labels).increment(1);
}

/// Record the final outcome of a registration submission
pub fn record_submission(outcome: &str) {
    counter!("registration_submissions_total", "outcome" => outcome.to_string()).increment(1);
}

/// Sanitize URL path for metric labels (remove IDs, limit cardinality)
fn sanitize_path(path: &str) -> String {
    let path = UUID_SEGMENT.replace_all(path, "{id}");
    let path = NUMERIC_SEGMENT.replace_all(&path, "/{id}$1");

    if path.len() > 50 {
        path.chars().take(50).collect()
    } else {
        path.to_string()
    }
}
