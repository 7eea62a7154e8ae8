//! Registration domain - Team registration form, attachments and submission outcomes

mod documents;
mod entity;
mod outcome;
mod validation;

pub use documents::RegistrationDocuments;
pub use entity::{Player, PlayerRole, RegistrationForm, TeamCategory};
pub use outcome::{FieldError, RegistrationReceipt, SubmissionOutcome};
pub use validation::{is_valid_email, validate_registration_form, RegistrationValidationError};

/// Operation name under which registration idempotency keys are stored
pub const REGISTRATION_OPERATION: &str = "team_registration";
