//! In-process view counter

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, ViewCounterStore};
use forum_core::value_objects::Snowflake;

/// View counter held in a `DashMap`
///
/// The increment runs under the key's shard lock, so concurrent views of one
/// article each observe a distinct value.
#[derive(Debug, Default)]
pub struct MemoryViewCounter {
    counts: DashMap<Snowflake, i64>,
    latency: Option<Duration>,
    unavailable: bool,
}

impl MemoryViewCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter that sleeps for `latency` before every increment
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Counter whose every call fails, as if the cache were down
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Current value without incrementing
    pub fn get(&self, article_id: Snowflake) -> Option<i64> {
        self.counts.get(&article_id).map(|v| *v)
    }
}

#[async_trait]
impl ViewCounterStore for MemoryViewCounter {
    async fn incr(&self, article_id: Snowflake) -> RepoResult<i64> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.unavailable {
            return Err(DomainError::CacheError("view counter unavailable".into()));
        }
        let mut entry = self.counts.entry(article_id).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    async fn ping(&self) -> RepoResult<()> {
        if self.unavailable {
            return Err(DomainError::CacheError("view counter unavailable".into()));
        }
        Ok(())
    }
}
