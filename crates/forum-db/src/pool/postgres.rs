//! PostgreSQL connection pool and schema migrations

use std::time::Duration;

use forum_common::DatabaseConfig;
use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Connection lifecycle limits applied on top of [`DatabaseConfig`]
#[derive(Debug, Clone, Copy)]
pub struct PoolTimeouts {
    pub acquire: Duration,
    pub idle: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolTimeouts {
    fn default() -> Self {
        Self {
            acquire: Duration::from_secs(10),
            idle: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Create a new PostgreSQL connection pool
pub async fn create_pool(
    config: &DatabaseConfig,
    timeouts: PoolTimeouts,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(timeouts.acquire)
        .idle_timeout(timeouts.idle)
        .max_lifetime(timeouts.max_lifetime)
        .connect(&config.url)
        .await
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("database migrations applied");
    Ok(())
}
