//! Redis view counter: one integer key per article, no expiry

use async_trait::async_trait;
use tracing::instrument;

use forum_core::traits::{RepoResult, ViewCounterStore};
use forum_core::value_objects::Snowflake;

use crate::pool::RedisPool;

/// View counter backed by Redis `INCR`
#[derive(Clone, Debug)]
pub struct RedisViewCounter {
    pool: RedisPool,
    key_prefix: String,
}

impl RedisViewCounter {
    pub fn new(pool: RedisPool, key_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            key_prefix: key_prefix.into(),
        }
    }

    /// Redis key holding the article's counter
    #[must_use]
    pub fn key(&self, article_id: Snowflake) -> String {
        format!("{}{article_id}", self.key_prefix)
    }
}

#[async_trait]
impl ViewCounterStore for RedisViewCounter {
    #[instrument(skip(self))]
    async fn incr(&self, article_id: Snowflake) -> RepoResult<i64> {
        Ok(self.pool.incr(&self.key(article_id)).await?)
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(self.pool.health_check().await?)
    }
}
