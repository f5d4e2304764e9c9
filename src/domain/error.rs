use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Already exists: {message}")]
    AlreadyExists { message: String },

    #[error("Unauthorized access: {message}")]
    UnauthorizedAccess { message: String },

    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    pub fn unauthorized_access(message: impl Into<String>) -> Self {
        Self::UnauthorizedAccess {
            message: message.into(),
        }
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("News item 'abc' not found");
        assert_eq!(error.to_string(), "Not found: News item 'abc' not found");
    }

    #[test]
    fn test_already_exists_error() {
        let error = DomainError::already_exists("Email taken");
        assert_eq!(error.to_string(), "Already exists: Email taken");
    }

    #[test]
    fn test_unauthorized_access_error() {
        let error = DomainError::unauthorized_access("not the owner");
        assert_eq!(
            error.to_string(),
            "Unauthorized access: not the owner"
        );
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }
}
