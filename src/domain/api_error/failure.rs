//! Raw failure shapes produced by the transport layer

use serde_json::Value;

/// Error payload returned by the backend alongside a non-success status
#[derive(Debug, Clone, PartialEq)]
pub struct BackendErrorBody {
    /// Machine-readable code; may be empty when the backend only sent a message
    pub error_code: String,
    pub message: String,
    pub details: Option<Value>,
    /// Explicit retry hint from the backend
    pub retryable: Option<bool>,
}

impl BackendErrorBody {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
            retryable: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    /// Extracts a structured error from a response body
    ///
    /// Accepts `{ "error": { code, message, details, retryable } }` as well as the flat
    /// form `{ errorCode | code, message, details, retryable }`. Returns `None` when the
    /// body is not JSON or carries neither a code nor a message.
    pub fn from_response_body(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        let root = value.as_object()?;

        let source = match root.get("error") {
            Some(Value::Object(nested)) => nested,
            Some(Value::String(message)) if !root.contains_key("message") => {
                let error_code = string_field(root, &["errorCode", "error_code", "code"]);
                return Some(Self::new(error_code, message.clone()));
            }
            _ => root,
        };

        let error_code = string_field(source, &["errorCode", "error_code", "code"]);
        let message = string_field(source, &["message", "detail"]);

        if error_code.is_empty() && message.is_empty() {
            return None;
        }

        Some(Self {
            error_code,
            message,
            details: source.get("details").filter(|d| !d.is_null()).cloned(),
            retryable: source
                .get("retryable")
                .or_else(|| source.get("isRetryable"))
                .and_then(Value::as_bool),
        })
    }
}

fn string_field(object: &serde_json::Map<String, Value>, names: &[&str]) -> String {
    names
        .iter()
        .find_map(|name| object.get(*name).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// Every way an outbound call can fail, before classification
#[derive(Debug, Clone, PartialEq)]
pub enum TransportFailure {
    /// The backend answered with a structured error body
    Server { status: u16, body: BackendErrorBody },
    /// No response was received (connection refused, DNS, reset)
    NoResponse { message: String },
    /// The request exceeded its deadline
    TimedOut,
    /// The caller aborted the request
    Cancelled,
    /// Non-success status without a structured body
    HttpStatus { status: u16 },
    /// A local error unrelated to the transport (decoding, request building)
    Error { message: String },
    /// A failure of unknown shape
    Unrecognized,
}
