//! PostgreSQL news repository implementation

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};

use crate::domain::news::{
    NewsCategory, NewsFilter, NewsId, NewsItem, NewsRepository, NewsStatus,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

const NEWS_COLUMNS: &str = "id, source, title, summary, link, image_url, category, user_id, \
                            is_public, status, is_favorite, personal_note, created_at, updated_at";

/// PostgreSQL implementation of NewsRepository
#[derive(Debug, Clone)]
pub struct PostgresNewsRepository {
    pool: PgPool,
}

impl PostgresNewsRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for PostgresNewsRepository {
    async fn get(&self, id: &NewsId) -> Result<Option<NewsItem>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM news WHERE id = $1",
            NEWS_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get news item: {}", e)))?;

        row.map(|row| row_to_news(&row)).transpose()
    }

    async fn create(&self, item: NewsItem) -> Result<NewsItem, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO news (id, source, title, summary, link, image_url, category,
                              user_id, is_public, status, is_favorite, personal_note,
                              created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(item.id().as_str())
        .bind(item.source())
        .bind(item.title())
        .bind(item.summary())
        .bind(item.link())
        .bind(item.image_url())
        .bind(item.category().as_str())
        .bind(item.user_id().as_str())
        .bind(item.is_public())
        .bind(item.status().as_str())
        .bind(item.is_favorite())
        .bind(item.personal_note())
        .bind(item.created_at())
        .bind(item.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::already_exists(format!(
                    "News item with link '{}' already exists for this user",
                    item.link()
                ))
            } else {
                DomainError::storage(format!("Failed to create news item: {}", e))
            }
        })?;

        Ok(item)
    }

    async fn update(&self, item: &NewsItem) -> Result<NewsItem, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE news
            SET source = $2, title = $3, summary = $4, link = $5, image_url = $6,
                category = $7, is_public = $8, status = $9, is_favorite = $10,
                personal_note = $11, updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(item.id().as_str())
        .bind(item.source())
        .bind(item.title())
        .bind(item.summary())
        .bind(item.link())
        .bind(item.image_url())
        .bind(item.category().as_str())
        .bind(item.is_public())
        .bind(item.status().as_str())
        .bind(item.is_favorite())
        .bind(item.personal_note())
        .bind(item.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::already_exists(format!(
                    "News item with link '{}' already exists for this user",
                    item.link()
                ))
            } else {
                DomainError::storage(format!("Failed to update news item: {}", e))
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "News item '{}' not found",
                item.id().as_str()
            )));
        }

        Ok(item.clone())
    }

    async fn update_personal_note(
        &self,
        id: &NewsId,
        user_id: &UserId,
        note: Option<&str>,
    ) -> Result<NewsItem, DomainError> {
        // Only the note and timestamp columns change. The user_id predicate
        // keeps a non-owner from telling a foreign item apart from a missing one.
        let row = sqlx::query(&format!(
            r#"
            UPDATE news
            SET personal_note = $3, updated_at = $4
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            NEWS_COLUMNS
        ))
        .bind(id.as_str())
        .bind(user_id.as_str())
        .bind(note)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update personal note: {}", e)))?;

        match row {
            Some(row) => row_to_news(&row),
            None => Err(DomainError::not_found(format!(
                "News item '{}' not found",
                id.as_str()
            ))),
        }
    }

    async fn delete(&self, id: &NewsId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete news item: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_link_and_user(
        &self,
        link: &str,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM news WHERE link = $1 AND user_id = $2)",
        )
        .bind(link)
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check for news item: {}", e)))?;

        Ok(exists)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        filter: &NewsFilter,
    ) -> Result<Vec<NewsItem>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM news
            WHERE user_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR category = $3)
              AND ($4::boolean IS NULL OR is_favorite = $4)
              AND ($5::timestamptz IS NULL OR created_at >= $5)
              AND ($6::timestamptz IS NULL OR created_at <= $6)
            ORDER BY created_at DESC
            LIMIT $7 OFFSET $8
            "#,
            NEWS_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.is_favorite)
        .bind(filter.date_from)
        .bind(filter.date_to)
        .bind(filter.limit() as i64)
        .bind(filter.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list news items: {}", e)))?;

        rows.iter().map(row_to_news).collect()
    }

    async fn list_public(&self, filter: &NewsFilter) -> Result<Vec<NewsItem>, DomainError> {
        // Status and favorite are reading-progress fields of the owner, so the
        // public listing only honors category and date bounds.
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM news
            WHERE is_public = TRUE
              AND ($1::text IS NULL OR category = $1)
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
            NEWS_COLUMNS
        ))
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.date_from)
        .bind(filter.date_to)
        .bind(filter.limit() as i64)
        .bind(filter.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list public news: {}", e)))?;

        rows.iter().map(row_to_news).collect()
    }
}

fn row_to_news(row: &sqlx::postgres::PgRow) -> Result<NewsItem, DomainError> {
    let id: String = row.get("id");
    let source: String = row.get("source");
    let title: String = row.get("title");
    let summary: String = row.get("summary");
    let link: String = row.get("link");
    let image_url: String = row.get("image_url");
    let category: String = row.get("category");
    let user_id: String = row.get("user_id");
    let is_public: bool = row.get("is_public");
    let status: String = row.get("status");
    let is_favorite: bool = row.get("is_favorite");
    let personal_note: Option<String> = row.get("personal_note");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let category = NewsCategory::parse(&category)
        .map_err(|e| DomainError::storage(format!("Invalid category in database: {}", e)))?;
    let status = NewsStatus::parse(&status)
        .map_err(|e| DomainError::storage(format!("Invalid status in database: {}", e)))?;

    Ok(NewsItem::from_parts(
        NewsId::new(id),
        source,
        title,
        summary,
        link,
        image_url,
        category,
        UserId::new(user_id),
        is_public,
        status,
        is_favorite,
        personal_note,
        created_at,
        updated_at,
    ))
}
