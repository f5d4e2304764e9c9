//! News repository trait and listing filter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use super::entity::{NewsCategory, NewsId, NewsItem, NewsStatus};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Filter for news listings; all criteria are optional and combine with AND
#[derive(Debug, Clone, Default)]
pub struct NewsFilter {
    pub status: Option<NewsStatus>,
    pub category: Option<NewsCategory>,
    pub is_favorite: Option<bool>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl NewsFilter {
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Whether an item matches the non-pagination criteria
    pub fn matches(&self, item: &NewsItem) -> bool {
        if let Some(status) = self.status {
            if item.status() != status {
                return false;
            }
        }
        if let Some(category) = self.category {
            if item.category() != category {
                return false;
            }
        }
        if let Some(is_favorite) = self.is_favorite {
            if item.is_favorite() != is_favorite {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if item.created_at() < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if item.created_at() > to {
                return false;
            }
        }

        true
    }
}

/// Repository trait for news item storage
#[async_trait]
pub trait NewsRepository: Send + Sync + Debug {
    /// Get a news item by its ID
    async fn get(&self, id: &NewsId) -> Result<Option<NewsItem>, DomainError>;

    /// Create a new news item
    async fn create(&self, item: NewsItem) -> Result<NewsItem, DomainError>;

    /// Update an existing news item (whole-entity update)
    async fn update(&self, item: &NewsItem) -> Result<NewsItem, DomainError>;

    /// Update only the personal note (and updated_at) of an item owned by
    /// `user_id`; targeted so concurrent edits to other fields are not
    /// clobbered
    async fn update_personal_note(
        &self,
        id: &NewsId,
        user_id: &UserId,
        note: Option<&str>,
    ) -> Result<NewsItem, DomainError>;

    /// Delete a news item
    async fn delete(&self, id: &NewsId) -> Result<bool, DomainError>;

    /// Check whether the (link, user_id) pair already exists
    async fn exists_by_link_and_user(
        &self,
        link: &str,
        user_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// List items owned by a user, filtered, newest first
    async fn list_by_user(
        &self,
        user_id: &UserId,
        filter: &NewsFilter,
    ) -> Result<Vec<NewsItem>, DomainError>;

    /// List public items, filtered, newest first. The status and favorite
    /// criteria do not apply here; they are per-owner attributes.
    async fn list_public(&self, filter: &NewsFilter) -> Result<Vec<NewsItem>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::news::entity::NewNewsItem;

    fn item(status: NewsStatus, category: NewsCategory, favorite: bool) -> NewsItem {
        let mut item = NewsItem::new(
            NewsId::new("n"),
            NewNewsItem {
                source: "src".to_string(),
                title: "title".to_string(),
                summary: "summary".to_string(),
                link: "https://x.com/1".to_string(),
                image_url: None,
                category,
                user_id: UserId::new("u"),
                is_public: None,
            },
        )
        .unwrap();

        item.update_status(status);
        if favorite {
            item.toggle_favorite();
        }
        item
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = NewsFilter::default();
        assert!(filter.matches(&item(NewsStatus::Read, NewsCategory::Opinion, true)));
        assert_eq!(filter.limit(), 100);
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn test_filter_by_status_and_category() {
        let filter = NewsFilter {
            status: Some(NewsStatus::Pending),
            category: Some(NewsCategory::Research),
            ..Default::default()
        };

        assert!(filter.matches(&item(NewsStatus::Pending, NewsCategory::Research, false)));
        assert!(!filter.matches(&item(NewsStatus::Read, NewsCategory::Research, false)));
        assert!(!filter.matches(&item(NewsStatus::Pending, NewsCategory::General, false)));
    }

    #[test]
    fn test_filter_by_favorite() {
        let filter = NewsFilter {
            is_favorite: Some(true),
            ..Default::default()
        };

        assert!(filter.matches(&item(NewsStatus::Pending, NewsCategory::General, true)));
        assert!(!filter.matches(&item(NewsStatus::Pending, NewsCategory::General, false)));
    }

    #[test]
    fn test_filter_by_date_range() {
        let it = item(NewsStatus::Pending, NewsCategory::General, false);

        let inside = NewsFilter {
            date_from: Some(it.created_at() - chrono::Duration::hours(1)),
            date_to: Some(it.created_at() + chrono::Duration::hours(1)),
            ..Default::default()
        };
        assert!(inside.matches(&it));

        let before = NewsFilter {
            date_to: Some(it.created_at() - chrono::Duration::hours(1)),
            ..Default::default()
        };
        assert!(!before.matches(&it));
    }
}
