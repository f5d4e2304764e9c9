//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_email, validate_username, UserValidationError};

/// User identifier - an opaque string assigned at creation time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User entity for authentication and profile management
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Email address, globally unique
    email: String,
    /// Username for login, globally unique
    username: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    hashed_password: String,
    /// Whether the account may log in
    is_active: bool,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user, validating email and username
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        username: impl Into<String>,
        hashed_password: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let email = email.into();
        let username = username.into();

        validate_email(&email)?;
        validate_username(&username)?;

        let now = Utc::now();

        Ok(Self {
            id,
            email,
            username,
            hashed_password: hashed_password.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct a user from persisted state without re-stamping timestamps
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: UserId,
        email: String,
        username: String,
        hashed_password: String,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            username,
            hashed_password,
            is_active,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn hashed_password(&self) -> &str {
        &self.hashed_password
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update email and/or username; `None` leaves the field untouched
    pub fn update_profile(
        &mut self,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Result<(), UserValidationError> {
        if let Some(email) = email {
            validate_email(email)?;
            self.email = email.to_string();
        }

        if let Some(username) = username {
            validate_username(username)?;
            self.username = username.to_string();
        }

        self.touch();
        Ok(())
    }

    /// Replace the password hash
    pub fn set_password_hash(
        &mut self,
        hashed_password: impl Into<String>,
    ) -> Result<(), UserValidationError> {
        let hashed_password = hashed_password.into();

        if hashed_password.trim().is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }

        self.hashed_password = hashed_password;
        self.touch();
        Ok(())
    }

    /// Deactivate the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    /// Activate a deactivated account
    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
