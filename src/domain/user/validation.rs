//! User field validation

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("User username cannot be empty")]
    EmptyUsername,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate an email address
///
/// Rules:
/// - Cannot be empty or whitespace-only
/// - Must contain an '@'
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.trim().is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if !email.contains('@') {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate a username
///
/// Cannot be empty or whitespace-only.
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.trim().is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    Ok(())
}

/// Validate a plaintext password before hashing
///
/// Rules:
/// - Minimum 6 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}
