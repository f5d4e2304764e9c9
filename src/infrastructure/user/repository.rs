//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username() == username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let id = user.id().as_str().to_string();

        if users.contains_key(&id) {
            return Err(DomainError::already_exists(format!(
                "User with ID '{}' already exists",
                id
            )));
        }

        if users.values().any(|u| u.email() == user.email()) {
            return Err(DomainError::already_exists(format!(
                "User with email {} already exists",
                user.email()
            )));
        }

        if users.values().any(|u| u.username() == user.username()) {
            return Err(DomainError::already_exists(format!(
                "User with username {} already exists",
                user.username()
            )));
        }

        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let id = user.id().as_str().to_string();

        if !users.contains_key(&id) {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        let email_taken = users
            .values()
            .any(|u| u.email() == user.email() && u.id().as_str() != id);
        if email_taken {
            return Err(DomainError::already_exists(format!(
                "User with email {} already exists",
                user.email()
            )));
        }

        let username_taken = users
            .values()
            .any(|u| u.username() == user.username() && u.id().as_str() != id);
        if username_taken {
            return Err(DomainError::already_exists(format!(
                "User with username {} already exists",
                user.username()
            )));
        }

        users.insert(id, user.clone());
        Ok(user.clone())
    }

    async fn update_password(
        &self,
        id: &UserId,
        hashed_password: &str,
    ) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let user = users
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        user.set_password_hash(hashed_password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(id.as_str()).is_some())
    }

    async fn list(&self, limit: usize) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        result.truncate(limit);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(id: &str, email: &str, username: &str) -> User {
        User::new(UserId::new(id), email, username, "hashed_password").unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("user-1", "a@x.com", "alice");

        repo.create(user.clone()).await.unwrap();

        let retrieved = repo.get(user.id()).await.unwrap().unwrap();
        assert_eq!(retrieved.username(), "alice");
    }

    #[tokio::test]
    async fn test_get_by_email_and_username() {
        let repo = InMemoryUserRepository::new();
        repo.create(create_test_user("user-1", "a@x.com", "alice"))
            .await
            .unwrap();

        let by_email = repo.get_by_email("a@x.com").await.unwrap();
        assert!(by_email.is_some());

        let by_username = repo.get_by_username("alice").await.unwrap();
        assert_eq!(by_username.unwrap().id().as_str(), "user-1");

        assert!(repo.get_by_email("missing@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_uniqueness() {
        let repo = InMemoryUserRepository::new();
        repo.create(create_test_user("user-1", "a@x.com", "alice"))
            .await
            .unwrap();

        let result = repo
            .create(create_test_user("user-2", "a@x.com", "bob"))
            .await;
        assert!(matches!(result, Err(DomainError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_username_uniqueness() {
        let repo = InMemoryUserRepository::new();
        repo.create(create_test_user("user-1", "a@x.com", "alice"))
            .await
            .unwrap();

        let result = repo
            .create(create_test_user("user-2", "b@x.com", "alice"))
            .await;
        assert!(matches!(result, Err(DomainError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryUserRepository::new();
        let mut user = create_test_user("user-1", "a@x.com", "alice");
        repo.create(user.clone()).await.unwrap();

        user.update_profile(None, Some("alice2")).unwrap();
        repo.update(&user).await.unwrap();

        let retrieved = repo.get(user.id()).await.unwrap().unwrap();
        assert_eq!(retrieved.username(), "alice2");
    }

    #[tokio::test]
    async fn test_update_password_only_touches_hash() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("user-1", "a@x.com", "alice");
        repo.create(user.clone()).await.unwrap();

        let updated = repo
            .update_password(user.id(), "new_hash")
            .await
            .unwrap();

        assert_eq!(updated.hashed_password(), "new_hash");
        assert_eq!(updated.email(), "a@x.com");
        assert_eq!(updated.username(), "alice");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("user-1", "a@x.com", "alice");
        repo.create(user.clone()).await.unwrap();

        assert!(repo.delete(user.id()).await.unwrap());
        assert!(repo.get(user.id()).await.unwrap().is_none());
        assert!(!repo.delete(user.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let repo = InMemoryUserRepository::new();
        repo.create(create_test_user("user-1", "a@x.com", "alice"))
            .await
            .unwrap();
        repo.create(create_test_user("user-2", "b@x.com", "bob"))
            .await
            .unwrap();

        assert_eq!(repo.list(10).await.unwrap().len(), 2);
        assert_eq!(repo.list(1).await.unwrap().len(), 1);
    }
}
