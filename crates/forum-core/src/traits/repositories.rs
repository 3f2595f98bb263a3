//! Repository traits (ports) - define the interface for data access
//!
//! Plain repositories serve reads that need no isolation. Every business
//! operation that writes more than one row goes through a
//! [`ForumTransaction`] obtained from the [`TransactionManager`], so the
//! writes commit or roll back together.

use async_trait::async_trait;

use crate::entities::{Article, ArticleFilter, Comment, Notification, Tag, User};
use crate::error::DomainError;
use crate::value_objects::{Page, PageRequest, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Store `user.profile` and `user.updated_at`; every other column is
    /// left alone. Fails with `UserNotFound` if the user does not exist.
    async fn update_profile(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Article Repository
// ============================================================================

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Find article by ID, soft-deleted ones included
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Article>>;

    /// Alive articles matching `filter`, newest first
    async fn list_alive(&self, filter: &ArticleFilter, page: PageRequest)
        -> RepoResult<Page<Article>>;

    /// Alive articles written by `author_id`, newest first
    async fn find_alive_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Article>>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_article(&self, article_id: Snowflake) -> RepoResult<Vec<Tag>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Top-level comments of an article, oldest first
    async fn list_roots(&self, article_id: Snowflake, page: PageRequest)
        -> RepoResult<Page<Comment>>;

    /// Comments whose mention anchor (`be_mid`) equals `be_mid`, oldest first
    async fn list_by_mention(&self, be_mid: Snowflake, page: PageRequest)
        -> RepoResult<Page<Comment>>;

    /// All comments written by `author_id`, newest first
    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Comment>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append an entry to the recipient's feed
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Recipient's feed, newest first
    async fn list_for_recipient(
        &self,
        recipient_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Notification>>;
}

// ============================================================================
// Unit of work
// ============================================================================

#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// Open a new transaction
    async fn begin(&self) -> RepoResult<Box<dyn ForumTransaction>>;

    /// Check that the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

/// An open transaction
///
/// Dropping it without calling [`commit`](ForumTransaction::commit) discards
/// every write made through it.
#[async_trait]
pub trait ForumTransaction: Send {
    async fn find_user(&mut self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Add `delta` to the user's points and return the new balance.
    /// Fails with `UserNotFound` if the user does not exist.
    async fn adjust_points(&mut self, user_id: Snowflake, delta: i64) -> RepoResult<i64>;

    async fn insert_article(&mut self, article: &Article) -> RepoResult<()>;

    async fn insert_tags(&mut self, tags: &[Tag]) -> RepoResult<()>;

    /// Read an article and hold it against concurrent modification until
    /// the transaction ends
    async fn lock_article(&mut self, id: Snowflake) -> RepoResult<Option<Article>>;

    async fn set_article_alive(&mut self, id: Snowflake, alive: bool) -> RepoResult<()>;

    async fn find_comment(&mut self, id: Snowflake) -> RepoResult<Option<Comment>>;

    async fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()>;

    async fn commit(self: Box<Self>) -> RepoResult<()>;
}
