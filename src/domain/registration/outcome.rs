//! Submission outcomes surfaced to the UI layer

use serde::{Deserialize, Serialize};

use super::RegistrationValidationError;
use crate::domain::api_error::ApiError;
use crate::domain::upload::DocumentRejection;

/// Inline error for a single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<&RegistrationValidationError> for FieldError {
    fn from(error: &RegistrationValidationError) -> Self {
        Self::new(error.field(), error.to_string())
    }
}

impl From<DocumentRejection> for FieldError {
    fn from(rejection: DocumentRejection) -> Self {
        Self::new(rejection.kind.field_name(), rejection.message)
    }
}

/// Backend acknowledgement of a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    pub registration_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Single result of a registration submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(RegistrationReceipt),
    /// Field-scoped problems, shown inline next to the inputs
    FieldErrors(Vec<FieldError>),
    /// Transient failure that outlived the retry budget; the user may retry with the same key
    RetryableFailure(ApiError),
    /// Terminal failure with a human-readable message
    Fatal(ApiError),
    /// The user or a deadline aborted the submission; not reported as a failure
    Cancelled,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Message for an error banner, if the outcome warrants one
    pub fn banner_message(&self) -> Option<&str> {
        match self {
            Self::RetryableFailure(error) | Self::Fatal(error) => Some(&error.message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_error::{parse_api_error, TransportFailure};
    use crate::domain::upload::DocumentKind;

    #[test]
    fn test_field_error_from_validation() {
        let field: FieldError = (&RegistrationValidationError::InvalidEmail).into();
        assert_eq!(field.field, "contact_email");
        assert_eq!(field.message, "Please enter a valid email address");
    }

    #[test]
    fn test_field_error_from_rejection() {
        let field: FieldError = DocumentRejection {
            kind: DocumentKind::PaymentReceipt,
            message: "File too large: 6.0MB. Maximum allowed: 5MB".to_string(),
        }
        .into();

        assert_eq!(field.field, "payment_receipt");
        assert!(field.message.contains("too large"));
    }

    #[test]
    fn test_banner_message() {
        let fatal = SubmissionOutcome::Fatal(parse_api_error(TransportFailure::HttpStatus { status: 500 }));
        assert!(fatal.banner_message().unwrap().contains("500"));

        assert!(SubmissionOutcome::Cancelled.banner_message().is_none());
        assert!(SubmissionOutcome::FieldErrors(vec![]).banner_message().is_none());
    }

    #[test]
    fn test_receipt_deserialize() {
        let receipt: RegistrationReceipt =
            serde_json::from_str(r#"{"registration_id": "reg-42", "status": "pending_review"}"#)
                .unwrap();
        assert_eq!(receipt.registration_id, "reg-42");
        assert_eq!(receipt.message, None);
    }
}
