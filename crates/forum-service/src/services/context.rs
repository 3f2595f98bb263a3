//! Service context - dependency container for services
//!
//! Holds the repositories, the unit-of-work entry point, the cache and
//! queue handles and the id generator. Every handle is shared and
//! thread-safe; the context is built once at startup and cloned into
//! request handlers.

use std::sync::Arc;

use forum_cache::{Publisher, RedisPool, RedisViewCounter};
use forum_common::{AppConfig, NotificationConfig, ViewCounterConfig};
use forum_core::traits::{
    ArticleRepository, CommentRepository, DeliveryQueue, NotificationRepository, TagRepository,
    TransactionManager, UserRepository, ViewCounterStore,
};
use forum_core::{Snowflake, SnowflakeGenerator};
use forum_db::{
    MemoryStore, PgArticleRepository, PgCommentRepository, PgNotificationRepository, PgPool,
    PgTagRepository, PgTransactionManager, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    article_repo: Arc<dyn ArticleRepository>,
    tag_repo: Arc<dyn TagRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // Unit of work
    transactions: Arc<dyn TransactionManager>,

    // Cache and queue
    view_store: Arc<dyn ViewCounterStore>,
    delivery_queue: Arc<dyn DeliveryQueue>,

    snowflake_generator: Arc<SnowflakeGenerator>,
    views: ViewCounterConfig,
    notifications: NotificationConfig,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Wire the production adapters: PostgreSQL for persistence, Redis for
    /// view counters and notification delivery
    pub fn production(pool: PgPool, redis_pool: RedisPool, config: &AppConfig) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            article_repo: Arc::new(PgArticleRepository::new(pool.clone())),
            tag_repo: Arc::new(PgTagRepository::new(pool.clone())),
            comment_repo: Arc::new(PgCommentRepository::new(pool.clone())),
            notification_repo: Arc::new(PgNotificationRepository::new(pool.clone())),
            transactions: Arc::new(PgTransactionManager::new(pool)),
            view_store: Arc::new(RedisViewCounter::new(
                redis_pool.clone(),
                config.views.key_prefix.clone(),
            )),
            delivery_queue: Arc::new(Publisher::new(redis_pool)),
            snowflake_generator: Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)),
            views: config.views.clone(),
            notifications: config.notifications.clone(),
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn article_repo(&self) -> &dyn ArticleRepository {
        self.article_repo.as_ref()
    }

    pub fn tag_repo(&self) -> &dyn TagRepository {
        self.tag_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Entry point for multi-write business operations
    pub fn transactions(&self) -> &dyn TransactionManager {
        self.transactions.as_ref()
    }

    // === Cache and queue ===

    pub fn view_store(&self) -> &dyn ViewCounterStore {
        self.view_store.as_ref()
    }

    pub fn delivery_queue(&self) -> &dyn DeliveryQueue {
        self.delivery_queue.as_ref()
    }

    pub fn view_config(&self) -> &ViewCounterConfig {
        &self.views
    }

    pub fn notification_config(&self) -> &NotificationConfig {
        &self.notifications
    }

    // === Ids ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("view_store", &"dyn ViewCounterStore")
            .field("delivery_queue", &"dyn DeliveryQueue")
            .field("views", &self.views)
            .field("notifications", &self.notifications)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom adapters
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    article_repo: Option<Arc<dyn ArticleRepository>>,
    tag_repo: Option<Arc<dyn TagRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    transactions: Option<Arc<dyn TransactionManager>>,
    view_store: Option<Arc<dyn ViewCounterStore>>,
    delivery_queue: Option<Arc<dyn DeliveryQueue>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    views: Option<ViewCounterConfig>,
    notifications: Option<NotificationConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one in-memory store for every repository and the unit of work
    pub fn memory_store(self, store: &MemoryStore) -> Self {
        self.user_repo(Arc::new(store.clone()))
            .article_repo(Arc::new(store.clone()))
            .tag_repo(Arc::new(store.clone()))
            .comment_repo(Arc::new(store.clone()))
            .notification_repo(Arc::new(store.clone()))
            .transactions(Arc::new(store.clone()))
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn article_repo(mut self, repo: Arc<dyn ArticleRepository>) -> Self {
        self.article_repo = Some(repo);
        self
    }

    pub fn tag_repo(mut self, repo: Arc<dyn TagRepository>) -> Self {
        self.tag_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn transactions(mut self, transactions: Arc<dyn TransactionManager>) -> Self {
        self.transactions = Some(transactions);
        self
    }

    pub fn view_store(mut self, store: Arc<dyn ViewCounterStore>) -> Self {
        self.view_store = Some(store);
        self
    }

    pub fn delivery_queue(mut self, queue: Arc<dyn DeliveryQueue>) -> Self {
        self.delivery_queue = Some(queue);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn view_config(mut self, config: ViewCounterConfig) -> Self {
        self.views = Some(config);
        self
    }

    pub fn notification_config(mut self, config: NotificationConfig) -> Self {
        self.notifications = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// The id generator and both configs fall back to their defaults.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository, the unit of work,
    /// the view store or the delivery queue is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: self.user_repo.ok_or_else(|| missing("user_repo"))?,
            article_repo: self.article_repo.ok_or_else(|| missing("article_repo"))?,
            tag_repo: self.tag_repo.ok_or_else(|| missing("tag_repo"))?,
            comment_repo: self.comment_repo.ok_or_else(|| missing("comment_repo"))?,
            notification_repo: self
                .notification_repo
                .ok_or_else(|| missing("notification_repo"))?,
            transactions: self.transactions.ok_or_else(|| missing("transactions"))?,
            view_store: self.view_store.ok_or_else(|| missing("view_store"))?,
            delivery_queue: self.delivery_queue.ok_or_else(|| missing("delivery_queue"))?,
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
            views: self.views.unwrap_or_default(),
            notifications: self.notifications.unwrap_or_default(),
        })
    }
}

fn missing(name: &str) -> ServiceError {
    ServiceError::validation(format!("{name} is required"))
}
