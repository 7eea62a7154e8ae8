//! Team registration submission

mod service;

pub use service::{RegistrationService, REGISTRATIONS_PATH, REGISTRATION_PART};
