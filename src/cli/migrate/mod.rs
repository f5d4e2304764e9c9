//! Migrate command - applies pending database migrations

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{connect_pool, run_migrations, PostgresConfig};

/// Apply pending migrations against the configured database
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format,
    });

    let url = config
        .database
        .url
        .ok_or_else(|| anyhow::anyhow!("database.url (or APP__DATABASE__URL) is required"))?;

    let pool = connect_pool(
        &PostgresConfig::new(url).with_max_connections(config.database.max_connections),
    )
    .await?;

    run_migrations(&pool).await?;
    info!("Migrations applied");

    Ok(())
}
