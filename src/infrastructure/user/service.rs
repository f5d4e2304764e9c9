//! User service for registration, authentication and profile management

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::user::{
    validate_email, validate_password, validate_username, User, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Request for updating a user's profile
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub username: Option<String>,
}

/// Request for changing a user's password
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// User service for registration, authentication and management
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::already_exists(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::already_exists(format!(
                "Username '{}' is already taken",
                request.username
            )));
        }

        let hashed_password = self.hasher.hash(&request.password)?;

        let user = User::new(
            UserId::new(Uuid::new_v4().to_string()),
            request.email,
            request.username,
            hashed_password,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository.create(user).await
    }

    /// Authenticate with a username or email plus password.
    ///
    /// The identifier is tried as a username first, then as an email,
    /// matching how the login form accepts either.
    pub async fn authenticate(&self, identifier: &str, password: &str) -> Result<User, DomainError> {
        let user = match self.repository.get_by_username(identifier).await? {
            Some(user) => Some(user),
            None => self.repository.get_by_email(identifier).await?,
        };

        let user = user.ok_or_else(|| {
            DomainError::invalid_credentials("Incorrect username or password")
        })?;

        if !self.hasher.verify(password, user.hashed_password()) {
            return Err(DomainError::invalid_credentials(
                "Incorrect username or password",
            ));
        }

        if !user.is_active() {
            return Err(DomainError::validation("Inactive user"));
        }

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: &UserId) -> Result<User, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id.as_str())))
    }

    /// Get a user by email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_email(email).await
    }

    /// List users, newest first
    pub async fn list(&self, limit: usize) -> Result<Vec<User>, DomainError> {
        self.repository.list(limit).await
    }

    /// Update a user's email and/or username
    pub async fn update_profile(
        &self,
        id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;

        // Uniqueness only matters when the value actually changes, so a
        // no-op update of one's own email or username succeeds.
        if let Some(email) = request.email.as_deref() {
            if email != user.email() && self.repository.email_exists(email).await? {
                return Err(DomainError::already_exists(format!(
                    "Email '{}' is already registered",
                    email
                )));
            }
        }

        if let Some(username) = request.username.as_deref() {
            if username != user.username() && self.repository.username_exists(username).await? {
                return Err(DomainError::already_exists(format!(
                    "Username '{}' is already taken",
                    username
                )));
            }
        }

        user.update_profile(request.email.as_deref(), request.username.as_deref())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository.update(&user).await
    }

    /// Change a user's password after verifying the current one
    pub async fn change_password(
        &self,
        id: &UserId,
        request: ChangePasswordRequest,
    ) -> Result<User, DomainError> {
        let user = self.get(id).await?;

        if !self
            .hasher
            .verify(&request.current_password, user.hashed_password())
        {
            return Err(DomainError::invalid_credentials(
                "Current password is incorrect",
            ));
        }

        validate_password(&request.new_password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let new_hash = self.hasher.hash(&request.new_password)?;

        self.repository.update_password(id, &new_hash).await
    }

    /// Acknowledge a logout for an existing user.
    ///
    /// Tokens are stateless, so this only confirms the user exists.
    pub async fn logout(&self, id: &UserId) -> Result<bool, DomainError> {
        Ok(self.repository.get(id).await?.is_some())
    }

    /// Deactivate a user
    pub async fn deactivate(&self, id: &UserId) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;
        user.deactivate();
        self.repository.update(&user).await
    }

    /// Reactivate a user
    pub async fn activate(&self, id: &UserId) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;
        user.activate();
        self.repository.update(&user).await
    }
}
