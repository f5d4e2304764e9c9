//! News service for item tracking, listings and reading progress

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::news::{
    NewNewsItem, NewsCategory, NewsFilter, NewsId, NewsItem, NewsRepository, NewsStatus,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Per-user reading statistics
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct NewsStats {
    pub pending: usize,
    pub reading: usize,
    pub read: usize,
    pub favorite: usize,
    pub total: usize,
}

/// News service for item tracking and reading progress
#[derive(Debug)]
pub struct NewsService<R: NewsRepository> {
    repository: Arc<R>,
}

impl<R: NewsRepository> NewsService<R> {
    /// Create a new news service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Track a new news item for a user.
    ///
    /// The same link can only be tracked once per user, and the check runs
    /// before any item is built so a duplicate never reaches the repository.
    pub async fn create(&self, fields: NewNewsItem) -> Result<NewsItem, DomainError> {
        if self
            .repository
            .exists_by_link_and_user(&fields.link, &fields.user_id)
            .await?
        {
            return Err(DomainError::already_exists(format!(
                "News item with link '{}' already exists for this user",
                fields.link
            )));
        }

        let item = NewsItem::new(NewsId::new(Uuid::new_v4().to_string()), fields)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository.create(item).await
    }

    /// List the items a user can see: their own plus everyone's public items.
    ///
    /// When the same link appears in both sets the user's own copy wins, so
    /// their reading progress shows instead of a stranger's.
    pub async fn user_news(
        &self,
        user_id: &UserId,
        filter: &NewsFilter,
    ) -> Result<Vec<NewsItem>, DomainError> {
        let own = self.repository.list_by_user(user_id, filter).await?;
        let public = self.repository.list_public(filter).await?;

        let mut seen_links: HashSet<String> =
            own.iter().map(|item| item.link().to_string()).collect();

        let mut combined = own;

        for item in public {
            if item.user_id() == user_id {
                continue;
            }
            if seen_links.insert(item.link().to_string()) {
                combined.push(item);
            }
        }

        combined.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        combined.truncate(filter.limit());

        Ok(combined)
    }

    /// List public items, no authentication required
    pub async fn public_news(&self, filter: &NewsFilter) -> Result<Vec<NewsItem>, DomainError> {
        self.repository.list_public(filter).await
    }

    /// Overwrite an item's reading status.
    ///
    /// Any status is reachable from any state here, including Read back to
    /// Reading. Callers that want the guarded transition use the entity's
    /// `mark_as_reading` instead.
    pub async fn update_status(
        &self,
        id: &NewsId,
        caller: &UserId,
        status: NewsStatus,
    ) -> Result<NewsItem, DomainError> {
        let mut item = self.load_owned(id, caller).await?;
        item.update_status(status);
        self.repository.update(&item).await
    }

    /// Flip an item's favorite flag
    pub async fn toggle_favorite(
        &self,
        id: &NewsId,
        caller: &UserId,
    ) -> Result<NewsItem, DomainError> {
        let mut item = self.load_owned(id, caller).await?;
        item.toggle_favorite();
        self.repository.update(&item).await
    }

    /// Change whether an item appears in the public listing
    pub async fn set_visibility(
        &self,
        id: &NewsId,
        caller: &UserId,
        is_public: bool,
    ) -> Result<NewsItem, DomainError> {
        let mut item = self.load_owned(id, caller).await?;
        item.set_public(is_public);
        self.repository.update(&item).await
    }

    /// Change an item's category
    pub async fn update_category(
        &self,
        id: &NewsId,
        caller: &UserId,
        category: NewsCategory,
    ) -> Result<NewsItem, DomainError> {
        let mut item = self.load_owned(id, caller).await?;
        item.update_category(category);
        self.repository.update(&item).await
    }

    /// Set or clear the owner's private note on an item.
    ///
    /// `None` clears the note. The repository only touches the note and
    /// timestamp columns, so concurrent status changes are not clobbered.
    pub async fn update_personal_note(
        &self,
        id: &NewsId,
        caller: &UserId,
        note: Option<&str>,
    ) -> Result<NewsItem, DomainError> {
        self.load_owned(id, caller).await?;

        if let Some(note) = note {
            if note.trim().is_empty() {
                return Err(DomainError::validation("Personal note cannot be empty"));
            }
        }

        self.repository.update_personal_note(id, caller, note).await
    }

    /// Reading statistics over everything the caller can see
    pub async fn stats(&self, user_id: &UserId) -> Result<NewsStats, DomainError> {
        let filter = NewsFilter {
            limit: Some(i64::MAX as usize),
            ..Default::default()
        };
        let items = self.user_news(user_id, &filter).await?;

        let mut stats = NewsStats {
            total: items.len(),
            ..Default::default()
        };

        for item in &items {
            match item.status() {
                NewsStatus::Pending => stats.pending += 1,
                NewsStatus::Reading => stats.reading += 1,
                NewsStatus::Read => stats.read += 1,
            }
            if item.is_favorite() {
                stats.favorite += 1;
            }
        }

        Ok(stats)
    }

    /// Load an item and verify the caller owns it
    async fn load_owned(&self, id: &NewsId, caller: &UserId) -> Result<NewsItem, DomainError> {
        let item = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("News item '{}' not found", id.as_str()))
            })?;

        if item.user_id() != caller {
            return Err(DomainError::unauthorized_access(
                "Not authorized to modify this news item",
            ));
        }

        Ok(item)
    }
}
