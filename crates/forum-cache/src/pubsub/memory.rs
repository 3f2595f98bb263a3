//! In-process delivery queue that records what was published

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use forum_core::error::DomainError;
use forum_core::traits::{DeliveryQueue, RepoResult};

#[derive(Debug, Default)]
pub struct MemoryDeliveryQueue {
    published: Mutex<Vec<(String, String)>>,
    latency: Option<Duration>,
    failing: bool,
}

impl MemoryDeliveryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue that rejects every publish
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Queue that sleeps for `latency` before accepting a publish
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// `(channel, payload)` pairs in publish order
    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().clone()
    }
}

#[async_trait]
impl DeliveryQueue for MemoryDeliveryQueue {
    async fn publish(&self, channel: &str, payload: String) -> RepoResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing {
            return Err(DomainError::CacheError("delivery queue unavailable".into()));
        }
        self.published.lock().push((channel.to_string(), payload));
        Ok(())
    }
}
