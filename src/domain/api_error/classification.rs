//! Failure classification
//!
//! `parse_api_error` is the only place an [`ApiError`] is built from a transport
//! failure, so callers branch on the classification and never on raw shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{ApiErrorCode, TransportFailure};

/// Fallback message for failures of unknown shape
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your internet connection and try again.";
const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";
const CANCELLED_MESSAGE: &str = "Request was cancelled";

/// Classified failure returned to callers
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub error_code: ApiErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub is_network_error: bool,
    pub is_retryable: bool,
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        self.error_code == ApiErrorCode::Cancelled
    }

    pub fn is_validation_error(&self) -> bool {
        self.error_code == ApiErrorCode::ValidationError
    }

    /// Field-level messages from `details` when it is an object of strings
    ///
    /// Non-string values are rendered as JSON; any other `details` shape yields `None`.
    pub fn field_messages(&self) -> Option<Vec<(String, String)>> {
        let details = self.details.as_ref()?.as_object()?;

        if details.is_empty() {
            return None;
        }

        Some(
            details
                .iter()
                .map(|(field, value)| {
                    let message = match value {
                        Value::String(s) => s.clone(),
                        Value::Array(items) => items
                            .iter()
                            .filter_map(Value::as_str)
                            .collect::<Vec<_>>()
                            .join("; "),
                        other => other.to_string(),
                    };
                    (field.clone(), message)
                })
                .collect(),
        )
    }
}

/// Normalises a transport failure into an [`ApiError`]
pub fn parse_api_error(failure: TransportFailure) -> ApiError {
    match failure {
        TransportFailure::Server { status, body } => {
            let error_code = if body.error_code.is_empty() {
                ApiErrorCode::Http(status)
            } else {
                ApiErrorCode::parse(&body.error_code)
            };
            let message = if body.message.is_empty() {
                status_message(status)
            } else {
                body.message
            };

            ApiError {
                message,
                error_code,
                details: body.details,
                is_network_error: false,
                is_retryable: body.retryable.unwrap_or(false),
            }
        }
        TransportFailure::NoResponse { .. } => ApiError {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            error_code: ApiErrorCode::NetworkError,
            details: None,
            is_network_error: true,
            is_retryable: true,
        },
        TransportFailure::TimedOut => ApiError {
            message: TIMEOUT_MESSAGE.to_string(),
            error_code: ApiErrorCode::Timeout,
            details: None,
            is_network_error: true,
            is_retryable: true,
        },
        TransportFailure::Cancelled => ApiError {
            message: CANCELLED_MESSAGE.to_string(),
            error_code: ApiErrorCode::Cancelled,
            details: None,
            is_network_error: false,
            is_retryable: false,
        },
        TransportFailure::HttpStatus { status } => ApiError {
            message: status_message(status),
            error_code: ApiErrorCode::Http(status),
            details: None,
            is_network_error: false,
            is_retryable: false,
        },
        TransportFailure::Error { message } => ApiError {
            message: if message.is_empty() {
                GENERIC_ERROR_MESSAGE.to_string()
            } else {
                message
            },
            error_code: ApiErrorCode::UnknownError,
            details: None,
            is_network_error: false,
            is_retryable: false,
        },
        TransportFailure::Unrecognized => ApiError {
            message: GENERIC_ERROR_MESSAGE.to_string(),
            error_code: ApiErrorCode::UnknownError,
            details: None,
            is_network_error: false,
            is_retryable: false,
        },
    }
}

fn status_message(status: u16) -> String {
    format!("Request failed with status code {}", status)
}
