//! Contact form message

use serde::{Deserialize, Serialize};

use crate::domain::registration::is_valid_email;
use crate::domain::DomainError;

const MAX_MESSAGE_LENGTH: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

pub fn validate_contact_message(contact: &ContactMessage) -> Result<(), DomainError> {
    if contact.name.trim().is_empty() {
        return Err(DomainError::validation("Name is required"));
    }

    if !is_valid_email(&contact.email) {
        return Err(DomainError::validation("Please enter a valid email address"));
    }

    let message = contact.message.trim();
    if message.is_empty() {
        return Err(DomainError::validation("Message is required"));
    }

    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(DomainError::validation(format!(
            "Message cannot exceed {} characters",
            MAX_MESSAGE_LENGTH
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactMessage {
        ContactMessage {
            name: "Fan".to_string(),
            email: "fan@example.com".to_string(),
            subject: "Tickets".to_string(),
            message: "When does the final start?".to_string(),
        }
    }

    #[test]
    fn test_valid_message() {
        assert!(validate_contact_message(&contact()).is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let mut message = contact();
        message.email = "fan-at-example".to_string();
        assert!(validate_contact_message(&message).is_err());
    }

    #[test]
    fn test_email_rules_match_registration_form() {
        for email in ["a b@example.com", "fan@@example.com", "fan@example"] {
            let mut message = contact();
            message.email = email.to_string();
            assert!(validate_contact_message(&message).is_err(), "{}", email);
        }

        let mut message = contact();
        message.email = "  fan+final@club.example.org ".to_string();
        assert!(validate_contact_message(&message).is_ok());
    }

    #[test]
    fn test_message_too_long() {
        let mut message = contact();
        message.message = "a".repeat(2001);

        let error = validate_contact_message(&message).unwrap_err();
        assert_eq!(error.to_string(), "Validation error: Message cannot exceed 2000 characters");
    }
}
