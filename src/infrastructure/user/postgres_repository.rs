//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

const USER_COLUMNS: &str =
    "id, email, username, hashed_password, is_active, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, username, hashed_password, is_active,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.email())
        .bind(user.username())
        .bind(user.hashed_password())
        .bind(user.is_active())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                if msg.contains("username") {
                    DomainError::already_exists(format!(
                        "Username '{}' is already taken",
                        user.username()
                    ))
                } else {
                    DomainError::already_exists(format!(
                        "Email '{}' is already registered",
                        user.email()
                    ))
                }
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, username = $3, hashed_password = $4, is_active = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.email())
        .bind(user.username())
        .bind(user.hashed_password())
        .bind(user.is_active())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                if msg.contains("username") {
                    DomainError::already_exists(format!(
                        "Username '{}' is already taken",
                        user.username()
                    ))
                } else {
                    DomainError::already_exists(format!(
                        "Email '{}' is already registered",
                        user.email()
                    ))
                }
            } else {
                DomainError::storage(format!("Failed to update user: {}", e))
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id().as_str()
            )));
        }

        Ok(user.clone())
    }

    async fn update_password(
        &self,
        id: &UserId,
        hashed_password: &str,
    ) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET hashed_password = $2, updated_at = $3
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id.as_str())
        .bind(hashed_password)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update password: {}", e)))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::not_found(format!(
                "User '{}' not found",
                id.as_str()
            ))),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, limit: usize) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC LIMIT $1",
            USER_COLUMNS
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let mut users = Vec::with_capacity(rows.len());

        for row in rows {
            users.push(row_to_user(&row)?);
        }

        Ok(users)
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: String = row.get("id");
    let email: String = row.get("email");
    let username: String = row.get("username");
    let hashed_password: String = row.get("hashed_password");
    let is_active: bool = row.get("is_active");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    Ok(User::from_parts(
        UserId::new(id),
        email,
        username,
        hashed_password,
        is_active,
        created_at,
        updated_at,
    ))
}
