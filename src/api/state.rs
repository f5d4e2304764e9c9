//! Application state for shared services

use std::sync::Arc;

use crate::domain::news::{
    NewNewsItem, NewsCategory, NewsFilter, NewsId, NewsItem, NewsRepository, NewsStatus,
};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::TokenIssuer;
use crate::infrastructure::news::{NewsService, NewsStats};
use crate::infrastructure::user::{
    ChangePasswordRequest, PasswordHasher, RegisterUserRequest, UpdateProfileRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub news_service: Arc<dyn NewsServiceTrait>,
    pub token_issuer: Arc<dyn TokenIssuer>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError>;
    async fn authenticate(&self, identifier: &str, password: &str) -> Result<User, DomainError>;
    async fn get(&self, id: &UserId) -> Result<User, DomainError>;
    async fn list(&self, limit: usize) -> Result<Vec<User>, DomainError>;
    async fn update_profile(
        &self,
        id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError>;
    async fn change_password(
        &self,
        id: &UserId,
        request: ChangePasswordRequest,
    ) -> Result<User, DomainError>;
    async fn logout(&self, id: &UserId) -> Result<bool, DomainError>;
}

/// Trait for news service operations
#[async_trait::async_trait]
pub trait NewsServiceTrait: Send + Sync {
    async fn create(&self, fields: NewNewsItem) -> Result<NewsItem, DomainError>;
    async fn user_news(
        &self,
        user_id: &UserId,
        filter: &NewsFilter,
    ) -> Result<Vec<NewsItem>, DomainError>;
    async fn public_news(&self, filter: &NewsFilter) -> Result<Vec<NewsItem>, DomainError>;
    async fn update_status(
        &self,
        id: &NewsId,
        caller: &UserId,
        status: NewsStatus,
    ) -> Result<NewsItem, DomainError>;
    async fn toggle_favorite(&self, id: &NewsId, caller: &UserId)
        -> Result<NewsItem, DomainError>;
    async fn set_visibility(
        &self,
        id: &NewsId,
        caller: &UserId,
        is_public: bool,
    ) -> Result<NewsItem, DomainError>;
    async fn update_category(
        &self,
        id: &NewsId,
        caller: &UserId,
        category: NewsCategory,
    ) -> Result<NewsItem, DomainError>;
    async fn update_personal_note(
        &self,
        id: &NewsId,
        caller: &UserId,
        note: Option<&str>,
    ) -> Result<NewsItem, DomainError>;
    async fn stats(&self, user_id: &UserId) -> Result<NewsStats, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R: UserRepository + 'static, H: PasswordHasher + 'static> UserServiceTrait
    for UserService<R, H>
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        UserService::register(self, request).await
    }

    async fn authenticate(&self, identifier: &str, password: &str) -> Result<User, DomainError> {
        UserService::authenticate(self, identifier, password).await
    }

    async fn get(&self, id: &UserId) -> Result<User, DomainError> {
        UserService::get(self, id).await
    }

    async fn list(&self, limit: usize) -> Result<Vec<User>, DomainError> {
        UserService::list(self, limit).await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        UserService::update_profile(self, id, request).await
    }

    async fn change_password(
        &self,
        id: &UserId,
        request: ChangePasswordRequest,
    ) -> Result<User, DomainError> {
        UserService::change_password(self, id, request).await
    }

    async fn logout(&self, id: &UserId) -> Result<bool, DomainError> {
        UserService::logout(self, id).await
    }
}

#[async_trait::async_trait]
impl<R: NewsRepository + 'static> NewsServiceTrait for NewsService<R> {
    async fn create(&self, fields: NewNewsItem) -> Result<NewsItem, DomainError> {
        NewsService::create(self, fields).await
    }

    async fn user_news(
        &self,
        user_id: &UserId,
        filter: &NewsFilter,
    ) -> Result<Vec<NewsItem>, DomainError> {
        NewsService::user_news(self, user_id, filter).await
    }

    async fn public_news(&self, filter: &NewsFilter) -> Result<Vec<NewsItem>, DomainError> {
        NewsService::public_news(self, filter).await
    }

    async fn update_status(
        &self,
        id: &NewsId,
        caller: &UserId,
        status: NewsStatus,
    ) -> Result<NewsItem, DomainError> {
        NewsService::update_status(self, id, caller, status).await
    }

    async fn toggle_favorite(
        &self,
        id: &NewsId,
        caller: &UserId,
    ) -> Result<NewsItem, DomainError> {
        NewsService::toggle_favorite(self, id, caller).await
    }

    async fn set_visibility(
        &self,
        id: &NewsId,
        caller: &UserId,
        is_public: bool,
    ) -> Result<NewsItem, DomainError> {
        NewsService::set_visibility(self, id, caller, is_public).await
    }

    async fn update_category(
        &self,
        id: &NewsId,
        caller: &UserId,
        category: NewsCategory,
    ) -> Result<NewsItem, DomainError> {
        NewsService::update_category(self, id, caller, category).await
    }

    async fn update_personal_note(
        &self,
        id: &NewsId,
        caller: &UserId,
        note: Option<&str>,
    ) -> Result<NewsItem, DomainError> {
        NewsService::update_personal_note(self, id, caller, note).await
    }

    async fn stats(&self, user_id: &UserId) -> Result<NewsStats, DomainError> {
        NewsService::stats(self, user_id).await
    }
}
