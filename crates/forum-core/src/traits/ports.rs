//! Cache and queue ports

use async_trait::async_trait;

use super::repositories::RepoResult;
use crate::value_objects::Snowflake;

/// Per-article view tally in a fast key-value store
#[async_trait]
pub trait ViewCounterStore: Send + Sync {
    /// Atomically increment the article's counter and return the new value.
    /// A missing counter starts at zero, so the first call returns 1.
    async fn incr(&self, article_id: Snowflake) -> RepoResult<i64>;

    async fn ping(&self) -> RepoResult<()>;
}

/// Outbound message queue for notification delivery
#[async_trait]
pub trait DeliveryQueue: Send + Sync {
    /// Publish an opaque payload to a named channel
    async fn publish(&self, channel: &str, payload: String) -> RepoResult<()>;
}
