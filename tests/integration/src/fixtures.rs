//! Test fixtures and data generators
//!
//! Request bodies sent to, and response bodies read from, the REST API.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub profile: Option<String>,
}

impl RegisterUserRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user{suffix}"),
            email: format!("user{suffix}@example.com"),
            profile: None,
        }
    }
}

/// Profile edit request
#[derive(Debug, Serialize)]
pub struct UpdateProfileRequest {
    pub profile: Option<String>,
}

/// Public user view
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub profile: Option<String>,
    pub points: i64,
    pub is_staff: bool,
}

/// Create article request
#[derive(Debug, Serialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl CreateArticleRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Article {suffix}"),
            body: format!("Body of article {suffix}"),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(ToString::to_string).collect();
        self
    }
}

/// Article response
#[derive(Debug, Deserialize)]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_id: String,
    pub alive: bool,
    pub tags: Vec<String>,
    pub views: Option<i64>,
}

/// Comment request
#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub article_id: String,
    pub content: String,
}

impl CreateCommentRequest {
    pub fn on(article_id: &str, content: &str) -> Self {
        Self {
            article_id: article_id.to_string(),
            content: content.to_string(),
        }
    }
}

/// Reply request; `root` and `parent` are `"0"` to start a new thread
#[derive(Debug, Serialize)]
pub struct ReplyRequest {
    pub article_id: String,
    pub be_mid: String,
    pub root: String,
    pub parent: String,
    pub content: String,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub article_id: String,
    pub author_id: String,
    pub content: String,
    pub be_mid: String,
    pub root: String,
    pub parent: String,
}

/// One page of a paginated listing
#[derive(Debug, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

/// Notification feed entry
#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub actor_id: String,
    pub recipient_id: String,
    pub verb: String,
    pub description: String,
}

/// Moderation delete request
#[derive(Debug, Serialize)]
pub struct ModerationDeleteRequest {
    pub article_ids: Vec<String>,
}

/// Moderation report entry
#[derive(Debug, Deserialize)]
pub struct ModerationOutcome {
    pub article_id: String,
    pub deleted: bool,
    pub author_points: Option<i64>,
    pub reason: Option<String>,
}

/// Moderation report
#[derive(Debug, Deserialize)]
pub struct ModerationReport {
    pub results: Vec<ModerationOutcome>,
}

/// User activities
#[derive(Debug, Deserialize)]
pub struct ActivityResponse {
    pub user_id: String,
    pub username: String,
    pub points: i64,
    pub articles: Vec<ArticleResponse>,
    pub comments: Vec<CommentResponse>,
}
