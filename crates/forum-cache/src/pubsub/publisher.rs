//! Redis Pub/Sub publisher.

use async_trait::async_trait;
use tracing::{debug, instrument};

use forum_core::traits::{DeliveryQueue, RepoResult};

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

/// Publishes delivery payloads with Redis `PUBLISH`
#[derive(Clone, Debug)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish a raw message, returning the number of receivers
    pub async fn publish_raw(&self, channel: &PubSubChannel, message: &str) -> RedisResult<u32> {
        let channel_name = channel.name();
        let receivers = self.pool.publish(&channel_name, message).await?;

        debug!(channel = %channel_name, receivers, "Published delivery payload");

        Ok(receivers)
    }
}

#[async_trait]
impl DeliveryQueue for Publisher {
    #[instrument(skip(self, payload))]
    async fn publish(&self, channel: &str, payload: String) -> RepoResult<()> {
        self.publish_raw(&PubSubChannel::parse(channel), &payload)
            .await?;
        Ok(())
    }
}
