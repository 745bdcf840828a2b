//! Shape checks for single intake answers.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::intake::FieldKey;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-z ]+$").unwrap();
    static ref EMAIL_RE: Regex = Regex::new(r"^[\w.-]+@gmail\.com$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^[6-9][0-9]{9}$").unwrap();
}

/// Why an intake answer was refused. The message is shown to the candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name should contain only letters and spaces.")]
    InvalidName,

    #[error("Please enter a valid Gmail address.")]
    InvalidEmail,

    #[error("Please enter a valid 10-digit Indian phone number.")]
    InvalidPhone,

    #[error("This field cannot be empty.")]
    Empty,
}

/// Letters and spaces only, at least one non-space character.
pub fn validate_name(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && NAME_RE.is_match(trimmed)
}

/// `<local>@gmail.com` where local is word, dot or hyphen characters.
pub fn validate_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

/// Ten digits, leading digit 6-9.
pub fn validate_phone(text: &str) -> bool {
    PHONE_RE.is_match(text)
}

pub fn validate_non_empty(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Run the validator assigned to `field`.
pub fn check(field: FieldKey, text: &str) -> Result<(), ValidationError> {
    let (valid, error) = match field {
        FieldKey::FullName => (validate_name(text), ValidationError::InvalidName),
        FieldKey::Email => (validate_email(text), ValidationError::InvalidEmail),
        FieldKey::Phone => (validate_phone(text), ValidationError::InvalidPhone),
        FieldKey::YearsExperience
        | FieldKey::DesiredPosition
        | FieldKey::Location
        | FieldKey::TechStack => (validate_non_empty(text), ValidationError::Empty),
    };

    if valid {
        Ok(())
    } else {
        Err(error)
    }
}
