//! Domain layer - Core types, pure checks and the seams infrastructure plugs into

pub mod api_error;
pub mod error;
pub mod idempotency;
pub mod registration;
pub mod tournament;
pub mod upload;

pub use api_error::{parse_api_error, ApiError, ApiErrorCode, BackendErrorBody, TransportFailure};
pub use error::DomainError;
pub use idempotency::{IdempotencyRecord, KeyValueStore};
pub use registration::{
    validate_registration_form, FieldError, Player, PlayerRole, RegistrationDocuments,
    RegistrationForm, RegistrationReceipt, RegistrationValidationError, SubmissionOutcome,
    TeamCategory, REGISTRATION_OPERATION,
};
pub use tournament::{
    validate_contact_message, ContactMessage, Match, MatchStatus, NewMatch, TeamStatus,
    TeamStatusUpdate, TeamSummary,
};
pub use upload::{
    is_valid_file_extension, is_valid_file_size, is_valid_mime_type, validate_file, DocumentKind,
    FileValidationPolicy, FileValidationResult, UploadFile,
};
