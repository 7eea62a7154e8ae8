//! Registration form validation

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::RegistrationForm;

const MAX_TEAM_NAME_LENGTH: usize = 100;
const MAX_PERSON_NAME_LENGTH: usize = 80;
pub const MIN_SQUAD_SIZE: usize = 11;
pub const MAX_SQUAD_SIZE: usize = 15;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Shared by every form that collects an email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

/// Errors that can occur during registration form validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistrationValidationError {
    #[error("Team name is required")]
    EmptyTeamName,

    #[error("Team name cannot exceed {0} characters")]
    TeamNameTooLong(usize),

    #[error("Captain name is required")]
    EmptyCaptainName,

    #[error("Captain name cannot exceed {0} characters")]
    CaptainNameTooLong(usize),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number (10-15 digits)")]
    InvalidPhone,

    #[error("A squad needs between {min} and {max} players, got {actual}")]
    SquadSize { min: usize, max: usize, actual: usize },

    #[error("Player {0} has no name")]
    EmptyPlayerName(usize),

    #[error("Jersey number {0} is used more than once")]
    DuplicateJerseyNumber(u16),
}

impl RegistrationValidationError {
    /// Form field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTeamName | Self::TeamNameTooLong(_) => "team_name",
            Self::EmptyCaptainName | Self::CaptainNameTooLong(_) => "captain_name",
            Self::InvalidEmail => "contact_email",
            Self::InvalidPhone => "contact_phone",
            Self::SquadSize { .. } | Self::EmptyPlayerName(_) | Self::DuplicateJerseyNumber(_) => {
                "players"
            }
        }
    }
}

/// Validates a registration form, collecting every failure
pub fn validate_registration_form(
    form: &RegistrationForm,
) -> Result<(), Vec<RegistrationValidationError>> {
    let mut errors = Vec::new();

    let team_name = form.team_name.trim();
    if team_name.is_empty() {
        errors.push(RegistrationValidationError::EmptyTeamName);
    } else if team_name.chars().count() > MAX_TEAM_NAME_LENGTH {
        errors.push(RegistrationValidationError::TeamNameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    let captain_name = form.captain_name.trim();
    if captain_name.is_empty() {
        errors.push(RegistrationValidationError::EmptyCaptainName);
    } else if captain_name.chars().count() > MAX_PERSON_NAME_LENGTH {
        errors.push(RegistrationValidationError::CaptainNameTooLong(MAX_PERSON_NAME_LENGTH));
    }

    if !is_valid_email(&form.contact_email) {
        errors.push(RegistrationValidationError::InvalidEmail);
    }

    let phone: String = form
        .contact_phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if !PHONE_PATTERN.is_match(&phone) {
        errors.push(RegistrationValidationError::InvalidPhone);
    }

    let squad = form.players.len();
    if !(MIN_SQUAD_SIZE..=MAX_SQUAD_SIZE).contains(&squad) {
        errors.push(RegistrationValidationError::SquadSize {
            min: MIN_SQUAD_SIZE,
            max: MAX_SQUAD_SIZE,
            actual: squad,
        });
    }

    let mut seen = HashSet::new();
    for (index, player) in form.players.iter().enumerate() {
        if player.name.trim().is_empty() {
            errors.push(RegistrationValidationError::EmptyPlayerName(index + 1));
        }

        if let Some(number) = player.jersey_number {
            if !seen.insert(number) {
                errors.push(RegistrationValidationError::DuplicateJerseyNumber(number));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::{Player, PlayerRole};

    fn squad(size: usize) -> Vec<Player> {
        (1..=size)
            .map(|i| Player::new(format!("Player {}", i), PlayerRole::AllRounder).with_jersey_number(i as u16))
            .collect()
    }

    fn valid_form() -> RegistrationForm {
        RegistrationForm::new("Riverside Strikers", "A. Kumar", "captain@example.com", "+91 98765-43210")
            .with_players(squad(11))
    }

    #[test]
    fn test_valid_form() {
        assert!(validate_registration_form(&valid_form()).is_ok());
    }

    #[test]
    fn test_empty_names() {
        let mut form = valid_form();
        form.team_name = "  ".to_string();
        form.captain_name = String::new();

        let errors = validate_registration_form(&form).unwrap_err();
        assert!(errors.contains(&RegistrationValidationError::EmptyTeamName));
        assert!(errors.contains(&RegistrationValidationError::EmptyCaptainName));
    }

    #[test]
    fn test_team_name_too_long() {
        let mut form = valid_form();
        form.team_name = "x".repeat(101);

        let errors = validate_registration_form(&form).unwrap_err();
        assert_eq!(errors, vec![RegistrationValidationError::TeamNameTooLong(100)]);
    }

    #[test]
    fn test_invalid_contact_details() {
        let mut form = valid_form();
        form.contact_email = "captain@example".to_string();
        form.contact_phone = "12345".to_string();

        let errors = validate_registration_form(&form).unwrap_err();
        assert!(errors.contains(&RegistrationValidationError::InvalidEmail));
        assert!(errors.contains(&RegistrationValidationError::InvalidPhone));
    }

    #[test]
    fn test_squad_size_bounds() {
        let mut form = valid_form();
        form.players = squad(10);
        assert!(validate_registration_form(&form).is_err());

        form.players = squad(15);
        assert!(validate_registration_form(&form).is_ok());

        form.players = squad(16);
        let errors = validate_registration_form(&form).unwrap_err();
        assert_eq!(
            errors,
            vec![RegistrationValidationError::SquadSize { min: 11, max: 15, actual: 16 }]
        );
    }

    #[test]
    fn test_duplicate_jersey_numbers() {
        let mut form = valid_form();
        form.players[3].jersey_number = Some(1);

        let errors = validate_registration_form(&form).unwrap_err();
        assert_eq!(errors, vec![RegistrationValidationError::DuplicateJerseyNumber(1)]);
        assert_eq!(errors[0].field(), "players");
    }

    #[test]
    fn test_error_fields() {
        assert_eq!(RegistrationValidationError::InvalidEmail.field(), "contact_email");
        assert_eq!(RegistrationValidationError::InvalidPhone.field(), "contact_phone");
        assert_eq!(RegistrationValidationError::EmptyTeamName.field(), "team_name");
    }
}
