//! Request-side checks applied before anything reaches the store.
//!
//! The store accepts any text; these rules only guard the command line.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern is valid")
});

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 120;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must be at least {min} characters", min = MIN_NAME_LEN)]
    NameTooShort,
    #[error("age must be between {min} and {max}, got {0}", min = MIN_AGE, max = MAX_AGE)]
    AgeOutOfRange(u32),
    #[error("invalid email address: {0}")]
    Email(String),
    #[error("phone number must look like +{country_code}-#####-#####, got {value}")]
    PhoneNumber { country_code: String, value: String },
    #[error("No updatable fields provided")]
    NoUpdatableFields,
}

pub fn name(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

pub fn age(value: u32) -> Result<(), ValidationError> {
    if !(MIN_AGE..=MAX_AGE).contains(&value) {
        return Err(ValidationError::AgeOutOfRange(value));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::Email(value.to_string()));
    }
    Ok(())
}

/// `+<country_code>-#####-#####`, ASCII digits only.
pub fn phone_number(value: &str, country_code: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::PhoneNumber {
        country_code: country_code.to_string(),
        value: value.to_string(),
    };
    let pattern = format!(r"^\+{}-[0-9]{{5}}-[0-9]{{5}}$", regex::escape(country_code));
    let re = Regex::new(&pattern).map_err(|_| invalid())?;
    if !re.is_match(value) {
        return Err(invalid());
    }
    Ok(())
}
