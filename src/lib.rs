//! Newsdesk
//!
//! A personal news tracking service with user accounts:
//! - Registration, login and profile management with JWT bearer tokens
//! - Per-user news items with a reading-status state machine
//! - Public/private visibility, favorites, categories and personal notes
//! - In-memory or PostgreSQL persistence

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::{AppState, NewsServiceTrait, UserServiceTrait};
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::news::{InMemoryNewsRepository, NewsService, PostgresNewsRepository};
use infrastructure::storage::{connect_pool, run_migrations, PostgresConfig};
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService,
};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
///
/// A configured database URL selects PostgreSQL persistence and applies
/// pending migrations; otherwise everything lives in memory.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::new());

    let (user_service, news_service): (Arc<dyn UserServiceTrait>, Arc<dyn NewsServiceTrait>) =
        match &config.database.url {
            Some(url) => {
                info!("Using PostgreSQL storage");

                let pool = connect_pool(
                    &PostgresConfig::new(url)
                        .with_max_connections(config.database.max_connections),
                )
                .await?;

                run_migrations(&pool).await?;

                (
                    Arc::new(UserService::new(
                        Arc::new(PostgresUserRepository::new(pool.clone())),
                        hasher,
                    )),
                    Arc::new(NewsService::new(Arc::new(PostgresNewsRepository::new(pool)))),
                )
            }
            None => {
                info!("Using in-memory storage");

                (
                    Arc::new(UserService::new(
                        Arc::new(InMemoryUserRepository::new()),
                        hasher,
                    )),
                    Arc::new(NewsService::new(Arc::new(InMemoryNewsRepository::new()))),
                )
            }
        };

    let token_issuer = Arc::new(JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_expiration_minutes,
    )));

    Ok(AppState {
        user_service,
        news_service,
        token_issuer,
    })
}
