//! In-memory news repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::news::{NewsFilter, NewsId, NewsItem, NewsRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of NewsRepository
#[derive(Debug, Default)]
pub struct InMemoryNewsRepository {
    items: Arc<RwLock<HashMap<String, NewsItem>>>,
}

impl InMemoryNewsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate(mut items: Vec<NewsItem>, filter: &NewsFilter) -> Vec<NewsItem> {
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    items
        .into_iter()
        .skip(filter.offset())
        .take(filter.limit())
        .collect()
}

#[async_trait]
impl NewsRepository for InMemoryNewsRepository {
    async fn get(&self, id: &NewsId) -> Result<Option<NewsItem>, DomainError> {
        let items = self.items.read().await;
        Ok(items.get(id.as_str()).cloned())
    }

    async fn create(&self, item: NewsItem) -> Result<NewsItem, DomainError> {
        let mut items = self.items.write().await;
        let id = item.id().as_str().to_string();

        if items.contains_key(&id) {
            return Err(DomainError::already_exists(format!(
                "News item with ID '{}' already exists",
                id
            )));
        }

        let duplicate = items
            .values()
            .any(|i| i.link() == item.link() && i.user_id() == item.user_id());
        if duplicate {
            return Err(DomainError::already_exists(format!(
                "News item with link '{}' already exists for user '{}'",
                item.link(),
                item.user_id()
            )));
        }

        items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, item: &NewsItem) -> Result<NewsItem, DomainError> {
        let mut items = self.items.write().await;
        let id = item.id().as_str().to_string();

        if !items.contains_key(&id) {
            return Err(DomainError::not_found(format!(
                "News item '{}' not found",
                id
            )));
        }

        items.insert(id, item.clone());
        Ok(item.clone())
    }

    async fn update_personal_note(
        &self,
        id: &NewsId,
        user_id: &UserId,
        note: Option<&str>,
    ) -> Result<NewsItem, DomainError> {
        let mut items = self.items.write().await;

        let item = items
            .get_mut(id.as_str())
            .filter(|i| i.user_id() == user_id)
            .ok_or_else(|| {
                DomainError::not_found(format!("News item '{}' not found", id))
            })?;

        match note {
            Some(note) => item
                .update_personal_note(note)
                .map_err(|e| DomainError::validation(e.to_string()))?,
            None => item.clear_personal_note(),
        }

        Ok(item.clone())
    }

    async fn delete(&self, id: &NewsId) -> Result<bool, DomainError> {
        let mut items = self.items.write().await;
        Ok(items.remove(id.as_str()).is_some())
    }

    async fn exists_by_link_and_user(
        &self,
        link: &str,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .any(|i| i.link() == link && i.user_id() == user_id))
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        filter: &NewsFilter,
    ) -> Result<Vec<NewsItem>, DomainError> {
        let items = self.items.read().await;

        let matching: Vec<NewsItem> = items
            .values()
            .filter(|i| i.user_id() == user_id && filter.matches(i))
            .cloned()
            .collect();

        Ok(paginate(matching, filter))
    }

    async fn list_public(&self, filter: &NewsFilter) -> Result<Vec<NewsItem>, DomainError> {
        let items = self.items.read().await;

        // Status and favorite are per-owner attributes; only category and
        // date range apply to the public listing.
        let public_filter = NewsFilter {
            status: None,
            is_favorite: None,
            ..filter.clone()
        };

        let matching: Vec<NewsItem> = items
            .values()
            .filter(|i| i.is_public() && public_filter.matches(i))
            .cloned()
            .collect();

        Ok(paginate(matching, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::news::{NewNewsItem, NewsCategory, NewsStatus};

    fn create_item(id: &str, link: &str, user: &str, public: bool) -> NewsItem {
        NewsItem::new(
            NewsId::new(id),
            NewNewsItem {
                source: "TechCrunch".to_string(),
                title: "Title".to_string(),
                summary: "Summary".to_string(),
                link: link.to_string(),
                image_url: None,
                category: NewsCategory::Research,
                user_id: UserId::new(user),
                is_public: Some(public),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryNewsRepository::new();
        let item = create_item("n1", "https://x.com/1", "u1", true);

        repo.create(item.clone()).await.unwrap();

        let retrieved = repo.get(item.id()).await.unwrap().unwrap();
        assert_eq!(retrieved.link(), "https://x.com/1");
    }

    #[tokio::test]
    async fn test_duplicate_link_same_user_rejected() {
        let repo = InMemoryNewsRepository::new();
        repo.create(create_item("n1", "https://x.com/1", "u1", true))
            .await
            .unwrap();

        let result = repo
            .create(create_item("n2", "https://x.com/1", "u1", true))
            .await;
        assert!(matches!(result, Err(DomainError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_link_different_user_allowed() {
        let repo = InMemoryNewsRepository::new();
        repo.create(create_item("n1", "https://x.com/1", "u1", true))
            .await
            .unwrap();

        let result = repo
            .create(create_item("n2", "https://x.com/1", "u2", true))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_exists_by_link_and_user() {
        let repo = InMemoryNewsRepository::new();
        repo.create(create_item("n1", "https://x.com/1", "u1", true))
            .await
            .unwrap();

        assert!(repo
            .exists_by_link_and_user("https://x.com/1", &UserId::new("u1"))
            .await
            .unwrap());
        assert!(!repo
            .exists_by_link_and_user("https://x.com/1", &UserId::new("u2"))
            .await
            .unwrap());
        assert!(!repo
            .exists_by_link_and_user("https://x.com/2", &UserId::new("u1"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_list_by_user_applies_filter() {
        let repo = InMemoryNewsRepository::new();

        let mut read_item = create_item("n1", "https://x.com/1", "u1", true);
        read_item.mark_as_read();
        repo.create(read_item).await.unwrap();
        repo.create(create_item("n2", "https://x.com/2", "u1", true))
            .await
            .unwrap();
        repo.create(create_item("n3", "https://x.com/3", "u2", true))
            .await
            .unwrap();

        let all = repo
            .list_by_user(&UserId::new("u1"), &NewsFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let pending_only = repo
            .list_by_user(
                &UserId::new("u1"),
                &NewsFilter {
                    status: Some(NewsStatus::Pending),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(pending_only.len(), 1);
        assert_eq!(pending_only[0].link(), "https://x.com/2");
    }

    #[tokio::test]
    async fn test_list_public_excludes_private() {
        let repo = InMemoryNewsRepository::new();
        repo.create(create_item("n1", "https://x.com/1", "u1", true))
            .await
            .unwrap();
        repo.create(create_item("n2", "https://x.com/2", "u1", false))
            .await
            .unwrap();

        let public = repo.list_public(&NewsFilter::default()).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].link(), "https://x.com/1");
    }

    #[tokio::test]
    async fn test_list_public_ignores_status_filter() {
        let repo = InMemoryNewsRepository::new();
        let mut item = create_item("n1", "https://x.com/1", "u1", true);
        item.mark_as_read();
        repo.create(item).await.unwrap();

        let public = repo
            .list_public(&NewsFilter {
                status: Some(NewsStatus::Pending),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(public.len(), 1);
    }

    #[tokio::test]
    async fn test_update_personal_note_scoped_to_owner() {
        let repo = InMemoryNewsRepository::new();
        let item = create_item("n1", "https://x.com/1", "u1", true);
        repo.create(item.clone()).await.unwrap();

        let updated = repo
            .update_personal_note(item.id(), &UserId::new("u1"), Some("good read"))
            .await
            .unwrap();
        assert_eq!(updated.personal_note(), Some("good read"));

        // Non-owner is indistinguishable from a missing document
        let result = repo
            .update_personal_note(item.id(), &UserId::new("u2"), Some("nope"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        let cleared = repo
            .update_personal_note(item.id(), &UserId::new("u1"), None)
            .await
            .unwrap();
        assert!(cleared.personal_note().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryNewsRepository::new();
        let item = create_item("n1", "https://x.com/1", "u1", true);
        repo.create(item.clone()).await.unwrap();

        assert!(repo.delete(item.id()).await.unwrap());
        assert!(!repo.delete(item.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_pagination() {
        let repo = InMemoryNewsRepository::new();
        for i in 0..5 {
            repo.create(create_item(
                &format!("n{}", i),
                &format!("https://x.com/{}", i),
                "u1",
                true,
            ))
            .await
            .unwrap();
        }

        let page = repo
            .list_by_user(
                &UserId::new("u1"),
                &NewsFilter {
                    limit: Some(2),
                    offset: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
    }
}
