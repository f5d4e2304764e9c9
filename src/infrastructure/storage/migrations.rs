//! Embedded schema migrations
//!
//! Migrations are embedded in the binary and tracked in a `_migrations`
//! table so that startup can bring any database up to the current schema.

use sqlx::postgres::PgPool;
use sqlx::Row;
use tracing::info;

use crate::domain::DomainError;

/// A single schema migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Monotonically increasing version number
    pub version: i64,
    /// Human readable description
    pub description: &'static str,
    /// SQL applied when migrating up
    pub up: &'static str,
    /// SQL applied when reverting
    pub down: &'static str,
}

/// All migrations in application order
fn all_migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            description: "create users table",
            up: r#"
                CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    email TEXT NOT NULL UNIQUE,
                    username TEXT NOT NULL UNIQUE,
                    hashed_password TEXT NOT NULL,
                    is_active BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMPTZ NOT NULL,
                    updated_at TIMESTAMPTZ NOT NULL
                )
            "#,
            down: "DROP TABLE IF EXISTS users",
        },
        Migration {
            version: 2,
            description: "create news table",
            up: r#"
                CREATE TABLE IF NOT EXISTS news (
                    id TEXT PRIMARY KEY,
                    source TEXT NOT NULL,
                    title TEXT NOT NULL,
                    summary TEXT NOT NULL,
                    link TEXT NOT NULL,
                    image_url TEXT NOT NULL DEFAULT '',
                    category TEXT NOT NULL DEFAULT 'general',
                    user_id TEXT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
                    is_public BOOLEAN NOT NULL DEFAULT TRUE,
                    status TEXT NOT NULL DEFAULT 'pending',
                    is_favorite BOOLEAN NOT NULL DEFAULT FALSE,
                    personal_note TEXT,
                    created_at TIMESTAMPTZ NOT NULL,
                    updated_at TIMESTAMPTZ NOT NULL,
                    UNIQUE (user_id, link)
                )
            "#,
            down: "DROP TABLE IF EXISTS news",
        },
        Migration {
            version: 3,
            description: "create news listing indexes",
            up: r#"
                CREATE INDEX IF NOT EXISTS idx_news_user_created
                    ON news (user_id, created_at DESC);
                CREATE INDEX IF NOT EXISTS idx_news_public_created
                    ON news (is_public, created_at DESC)
            "#,
            down: r#"
                DROP INDEX IF EXISTS idx_news_user_created;
                DROP INDEX IF EXISTS idx_news_public_created
            "#,
        },
    ]
}

/// Applies embedded migrations against a PostgreSQL database
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn applied_versions(&self) -> Result<Vec<i64>, DomainError> {
        let rows = sqlx::query("SELECT version FROM _migrations ORDER BY version")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to read migrations: {}", e)))?;

        Ok(rows.iter().map(|row| row.get("version")).collect())
    }

    async fn run_migration(&self, migration: &Migration) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        for statement in split_statements(migration.up) {
            sqlx::query(statement).execute(&mut *tx).await.map_err(|e| {
                DomainError::storage(format!(
                    "Migration {} failed: {}",
                    migration.version, e
                ))
            })?;
        }

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit migration: {}", e)))?;

        info!(
            version = migration.version,
            description = migration.description,
            "Applied migration"
        );

        Ok(())
    }

    /// Apply any migrations that have not been applied yet
    pub async fn migrate(&self) -> Result<(), DomainError> {
        self.ensure_migrations_table().await?;

        let applied = self.applied_versions().await?;

        for migration in all_migrations() {
            if !applied.contains(&migration.version) {
                self.run_migration(&migration).await?;
            }
        }

        Ok(())
    }
}

/// Run all pending migrations against the given pool
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    PostgresMigrator::new(pool.clone()).migrate().await
}

/// Split a migration body into individual statements.
///
/// Postgres rejects multi-statement strings through the extended protocol,
/// so each statement runs separately inside the migration transaction.
fn split_statements(sql: &str) -> impl Iterator<Item = &str> + '_ {
    sql.split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
}
