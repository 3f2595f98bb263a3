//! In-memory wiring shared by the service tests

use std::sync::Arc;

use forum_cache::{MemoryDeliveryQueue, MemoryViewCounter};
use forum_core::traits::UserRepository;
use forum_core::{Snowflake, User};
use forum_db::MemoryStore;

use super::context::ServiceContext;

pub(crate) struct Harness {
    pub ctx: ServiceContext,
    pub store: MemoryStore,
    pub views: Arc<MemoryViewCounter>,
    pub queue: Arc<MemoryDeliveryQueue>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(MemoryViewCounter::new(), MemoryDeliveryQueue::new())
    }

    pub fn with(views: MemoryViewCounter, queue: MemoryDeliveryQueue) -> Self {
        let store = MemoryStore::new();
        let views = Arc::new(views);
        let queue = Arc::new(queue);
        let ctx = ServiceContext::builder()
            .memory_store(&store)
            .view_store(views.clone())
            .delivery_queue(queue.clone())
            .build()
            .unwrap();
        Self {
            ctx,
            store,
            views,
            queue,
        }
    }

    pub async fn user(&self, username: &str) -> User {
        let user = User::new(
            self.ctx.generate_id(),
            username.to_string(),
            format!("{username}@example.com"),
        );
        self.store.insert_user(user.clone()).await;
        user
    }

    pub async fn staff(&self, username: &str) -> User {
        let user = User::new(
            self.ctx.generate_id(),
            username.to_string(),
            format!("{username}@example.com"),
        )
        .with_staff();
        self.store.insert_user(user.clone()).await;
        user
    }

    pub async fn points(&self, user_id: Snowflake) -> i64 {
        self.store.find_by_id(user_id).await.unwrap().unwrap().points
    }
}
