//! Registration orchestrator
//!
//! Runs a team registration through local validation, idempotency-key resolution and the
//! resilient client, and folds every result into a single [`SubmissionOutcome`].

use tracing::{info, warn};

use crate::domain::{
    parse_api_error, validate_registration_form, ApiError, FieldError, FileValidationPolicy,
    RegistrationDocuments, RegistrationForm, RegistrationReceipt, SubmissionOutcome,
    TransportFailure, REGISTRATION_OPERATION,
};
use crate::infrastructure::http::{
    AbortSignal, ApiRequest, ApiResponse, MultipartPart, ResilientClient,
};
use crate::infrastructure::idempotency::{generate_idempotency_key, SharedKeyStore};
use crate::infrastructure::observability::record_submission;

pub const REGISTRATIONS_PATH: &str = "/registrations";

/// Name of the multipart part carrying the form as JSON
pub const REGISTRATION_PART: &str = "registration";

#[derive(Debug, Clone)]
pub struct RegistrationService {
    client: ResilientClient,
    keys: SharedKeyStore,
    file_policy: FileValidationPolicy,
}

impl RegistrationService {
    pub fn new(client: ResilientClient, keys: SharedKeyStore, file_policy: FileValidationPolicy) -> Self {
        Self {
            client,
            keys,
            file_policy,
        }
    }

    pub fn file_policy(&self) -> &FileValidationPolicy {
        &self.file_policy
    }

    /// Whether an earlier, unfinished submission left a live key behind
    pub fn has_pending_submission(&self) -> bool {
        self.keys.has_valid_idempotency_key(REGISTRATION_OPERATION)
    }

    /// Submit a registration
    ///
    /// Form and file checks run before any key is resolved or any request is made. The
    /// key is cleared only after the backend accepted the registration.
    pub async fn submit(
        &self,
        form: &RegistrationForm,
        documents: &RegistrationDocuments,
        signal: &AbortSignal,
    ) -> SubmissionOutcome {
        let outcome = self.run(form, documents, signal).await;
        record_submission(outcome_label(&outcome));
        outcome
    }

    async fn run(
        &self,
        form: &RegistrationForm,
        documents: &RegistrationDocuments,
        signal: &AbortSignal,
    ) -> SubmissionOutcome {
        if let Err(errors) = validate_registration_form(form) {
            info!(errors = errors.len(), "Registration form rejected");
            return SubmissionOutcome::FieldErrors(errors.iter().map(FieldError::from).collect());
        }

        if let Err(rejection) = self.file_policy.validate_all(&documents.entries()) {
            info!(
                field = rejection.kind.field_name(),
                reason = %rejection.message,
                "Registration document rejected"
            );
            return SubmissionOutcome::FieldErrors(vec![rejection.into()]);
        }

        let key = match self.keys.resolve_idempotency_key(REGISTRATION_OPERATION) {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "Could not persist idempotency key, continuing with an unsaved key");
                generate_idempotency_key()
            }
        };

        let request = match build_request(form, documents, &key) {
            Ok(request) => request,
            Err(error) => return SubmissionOutcome::Fatal(error),
        };

        let result = self
            .client
            .execute_with_retry(&request, signal, self.client.retry_policy())
            .await;

        match result {
            Ok(response) => self.accept(response),
            Err(error) => classify_failure(error),
        }
    }

    fn accept(&self, response: ApiResponse) -> SubmissionOutcome {
        let receipt: RegistrationReceipt = match response.json() {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(error = %e, "Registration accepted but receipt could not be read");
                return SubmissionOutcome::Fatal(parse_api_error(TransportFailure::Error {
                    message: format!("Failed to parse response: {}", e),
                }));
            }
        };

        if let Err(e) = self.keys.clear_idempotency_key(REGISTRATION_OPERATION) {
            warn!(error = %e, "Failed to clear idempotency key after successful registration");
        }

        info!(registration_id = %receipt.registration_id, "Registration submitted");
        SubmissionOutcome::Success(receipt)
    }
}

fn build_request(
    form: &RegistrationForm,
    documents: &RegistrationDocuments,
    key: &str,
) -> Result<ApiRequest, ApiError> {
    let registration = serde_json::to_value(form).map_err(|e| {
        parse_api_error(TransportFailure::Error {
            message: format!("Failed to encode registration: {}", e),
        })
    })?;

    let mut parts = vec![MultipartPart::Json {
        name: REGISTRATION_PART.to_string(),
        value: registration,
    }];

    for (kind, file) in documents.entries() {
        parts.push(MultipartPart::File {
            name: kind.field_name().to_string(),
            file: file.clone(),
        });
    }

    Ok(ApiRequest::post(REGISTRATIONS_PATH)
        .with_idempotency_key(key)
        .with_multipart(parts))
}

fn classify_failure(error: ApiError) -> SubmissionOutcome {
    if error.is_cancelled() {
        info!("Registration cancelled");
        return SubmissionOutcome::Cancelled;
    }

    if error.is_validation_error() {
        if let Some(fields) = error.field_messages() {
            info!(fields = fields.len(), "Registration rejected by backend validation");
            return SubmissionOutcome::FieldErrors(
                fields
                    .into_iter()
                    .map(|(field, message)| FieldError::new(field, message))
                    .collect(),
            );
        }
    }

    if error.is_retryable {
        warn!(error_code = %error.error_code, "Registration failed, retry is possible");
        SubmissionOutcome::RetryableFailure(error)
    } else {
        warn!(error_code = %error.error_code, message = %error.message, "Registration failed");
        SubmissionOutcome::Fatal(error)
    }
}

fn outcome_label(outcome: &SubmissionOutcome) -> &'static str {
    match outcome {
        SubmissionOutcome::Success(_) => "success",
        SubmissionOutcome::FieldErrors(_) => "field_errors",
        SubmissionOutcome::RetryableFailure(_) => "retryable_failure",
        SubmissionOutcome::Fatal(_) => "fatal",
        SubmissionOutcome::Cancelled => "cancelled",
    }
}
