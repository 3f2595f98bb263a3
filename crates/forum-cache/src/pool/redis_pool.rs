//! Redis connection pool using deadpool-redis.

use deadpool_redis::{Config, Pool, Runtime};
use forum_core::DomainError;
use redis::AsyncCommands;

/// Redis pool configuration
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// Redis connection URL (e.g., `redis://localhost:6379`)
    pub url: String,
    pub max_connections: usize,
}

impl Default for RedisPoolConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 16,
        }
    }
}

impl From<&forum_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &forum_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
        }
    }
}

/// Error type for Redis pool operations
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Failed to create Redis pool: {0}")]
    CreatePool(String),

    #[error("Failed to get connection from pool: {0}")]
    GetConnection(#[from] deadpool_redis::PoolError),

    #[error("Redis command error: {0}")]
    Redis(#[from] redis::RedisError),
}

impl From<RedisPoolError> for DomainError {
    fn from(err: RedisPoolError) -> Self {
        DomainError::CacheError(err.to_string())
    }
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Managed Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl RedisPool {
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?;

        // Never log credentials
        let safe_url = config.url.split('@').next_back().unwrap_or(&config.url);
        tracing::info!(
            url = %safe_url,
            max_connections = config.max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    pub fn from_config(config: &forum_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(RedisPoolError::GetConnection)
    }

    /// Ping Redis through a pooled connection
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Atomic `INCR`; a missing key counts from zero
    pub async fn incr(&self, key: &str) -> RedisResult<i64> {
        let mut conn = self.get().await?;
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }

    /// `PUBLISH`, returning the number of subscribers that received it
    pub async fn publish(&self, channel: &str, payload: &str) -> RedisResult<u32> {
        let mut conn = self.get().await?;
        let receivers: u32 = conn.publish(channel, payload).await?;
        Ok(receivers)
    }
}
