//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their email address
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Get a user by their username (for login)
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Update only the password hash of a user
    async fn update_password(
        &self,
        id: &UserId,
        hashed_password: &str,
    ) -> Result<User, DomainError>;

    /// Delete a user
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;

    /// List users, newest first, up to `limit`
    async fn list(&self, limit: usize) -> Result<Vec<User>, DomainError>;

    /// Check if an email is taken
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    /// Check if a username is taken
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }
}
