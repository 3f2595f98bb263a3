use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use forum_core::entities::{Article, ArticleFilter, Comment, Notification, Tag, User};
use forum_core::error::DomainError;
use forum_core::traits::{
    ArticleRepository, CommentRepository, ForumTransaction, NotificationRepository, RepoResult,
    TagRepository, TransactionManager, UserRepository,
};
use forum_core::value_objects::{Page, PageRequest, Snowflake};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: HashMap<Snowflake, User>,
    articles: HashMap<Snowflake, Article>,
    tags: Vec<Tag>,
    comments: HashMap<Snowflake, Comment>,
    notifications: Vec<Notification>,
}

impl Tables {
    fn insert_article(&mut self, article: &Article) -> RepoResult<()> {
        if !self.users.contains_key(&article.author_id) {
            return Err(DomainError::UserNotFound(article.author_id));
        }
        self.articles.insert(article.id, article.clone());
        Ok(())
    }

    fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        if !self.articles.contains_key(&comment.article_id) {
            return Err(DomainError::ArticleNotFound(comment.article_id));
        }
        if !self.users.contains_key(&comment.author_id) {
            return Err(DomainError::UserNotFound(comment.author_id));
        }
        self.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    /// Comments matching `keep`, oldest first
    fn comment_page(&self, page: PageRequest, keep: impl Fn(&Comment) -> bool) -> Page<Comment> {
        let mut matching: Vec<&Comment> = self.comments.values().filter(|c| keep(c)).collect();
        matching.sort_by_key(|c| (c.created_at, c.id));
        let total = matching.len() as i64;
        let items = page.slice(&matching).into_iter().cloned().collect();
        Page::new(items, page, total)
    }
}

/// Shared in-memory store; clones share the same tables
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    fail_next_commit: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user row
    pub async fn insert_user(&self, user: User) {
        self.tables.lock().await.users.insert(user.id, user);
    }

    /// Delete a user row and nothing else, as when the deletion races an
    /// operation that already holds the user's articles
    pub async fn remove_user(&self, id: Snowflake) -> bool {
        self.tables.lock().await.users.remove(&id).is_some()
    }

    /// Make the next commit fail and discard its writes
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Number of rows in the notification feed, across all recipients
    pub async fn notification_count(&self) -> usize {
        self.tables.lock().await.notifications.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(DomainError::ValidationError(format!(
                "username already taken: {}",
                user.username
            )));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        let stored = tables
            .users
            .get_mut(&user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        stored.profile.clone_from(&user.profile);
        stored.updated_at = user.updated_at;
        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Article>> {
        Ok(self.tables.lock().await.articles.get(&id).cloned())
    }

    async fn list_alive(
        &self,
        filter: &ArticleFilter,
        page: PageRequest,
    ) -> RepoResult<Page<Article>> {
        let tables = self.tables.lock().await;
        let mut matching: Vec<&Article> = tables
            .articles
            .values()
            .filter(|a| a.alive && filter.matches(a))
            .collect();
        matching.sort_by_key(|a| Reverse((a.created_at, a.id)));
        let total = matching.len() as i64;
        let items = page.slice(&matching).into_iter().cloned().collect();
        Ok(Page::new(items, page, total))
    }

    async fn find_alive_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Article>> {
        let tables = self.tables.lock().await;
        let mut articles: Vec<Article> = tables
            .articles
            .values()
            .filter(|a| a.alive && a.author_id == author_id)
            .cloned()
            .collect();
        articles.sort_by_key(|a| Reverse((a.created_at, a.id)));
        Ok(articles)
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn find_by_article(&self, article_id: Snowflake) -> RepoResult<Vec<Tag>> {
        let tables = self.tables.lock().await;
        let mut tags: Vec<Tag> = tables
            .tags
            .iter()
            .filter(|t| t.article_id == article_id)
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.tables.lock().await.comments.get(&id).cloned())
    }

    async fn list_roots(
        &self,
        article_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Comment>> {
        let tables = self.tables.lock().await;
        Ok(tables.comment_page(page, |c| c.article_id == article_id && c.is_root()))
    }

    async fn list_by_mention(
        &self,
        be_mid: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Comment>> {
        let tables = self.tables.lock().await;
        Ok(tables.comment_page(page, |c| c.be_mid == Some(be_mid)))
    }

    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let tables = self.tables.lock().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.author_id == author_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| Reverse((c.created_at, c.id)));
        Ok(comments)
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&notification.recipient_id) {
            return Err(DomainError::UserNotFound(notification.recipient_id));
        }
        tables.notifications.push(notification.clone());
        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Notification>> {
        let tables = self.tables.lock().await;
        let mut feed: Vec<&Notification> = tables
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .collect();
        feed.sort_by_key(|n| Reverse((n.created_at, n.id)));
        let total = feed.len() as i64;
        let items = page.slice(&feed).into_iter().cloned().collect();
        Ok(Page::new(items, page, total))
    }
}

#[async_trait]
impl TransactionManager for MemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn ForumTransaction>> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction {
            guard,
            working,
            fail_commit: Arc::clone(&self.fail_next_commit),
        }))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

/// Transaction over a [`MemoryStore`]
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
    fail_commit: Arc<AtomicBool>,
}

#[async_trait]
impl ForumTransaction for MemoryTransaction {
    async fn find_user(&mut self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.working.users.get(&id).cloned())
    }

    async fn adjust_points(&mut self, user_id: Snowflake, delta: i64) -> RepoResult<i64> {
        self.working
            .users
            .get_mut(&user_id)
            .map(|user| user.apply_points(delta))
            .ok_or(DomainError::UserNotFound(user_id))
    }

    async fn insert_article(&mut self, article: &Article) -> RepoResult<()> {
        self.working.insert_article(article)
    }

    async fn insert_tags(&mut self, tags: &[Tag]) -> RepoResult<()> {
        for tag in tags {
            if !self.working.articles.contains_key(&tag.article_id) {
                return Err(DomainError::ArticleNotFound(tag.article_id));
            }
        }
        self.working.tags.extend_from_slice(tags);
        Ok(())
    }

    async fn lock_article(&mut self, id: Snowflake) -> RepoResult<Option<Article>> {
        Ok(self.working.articles.get(&id).cloned())
    }

    async fn set_article_alive(&mut self, id: Snowflake, alive: bool) -> RepoResult<()> {
        let article = self
            .working
            .articles
            .get_mut(&id)
            .ok_or(DomainError::ArticleNotFound(id))?;
        if alive {
            article.alive = true;
        } else {
            article.soft_delete();
        }
        Ok(())
    }

    async fn find_comment(&mut self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.working.comments.get(&id).cloned())
    }

    async fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        self.working.insert_comment(comment)
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let MemoryTransaction {
            mut guard,
            working,
            fail_commit,
        } = *self;

        if fail_commit.swap(false, Ordering::SeqCst) {
            return Err(DomainError::TransactionFailed(
                "commit rejected by store".to_string(),
            ));
        }

        *guard = working;
        debug!("memory transaction committed");
        Ok(())
    }
}
