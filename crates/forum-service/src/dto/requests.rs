//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Ids are accepted either as JSON strings or numbers.

use forum_core::{ArticleFilter, Snowflake};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// User Requests
// ============================================================================

/// Open a new account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Profile must be at most 500 characters"))]
    pub profile: Option<String>,
}

/// Replace the owner's profile text; `null` clears it
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 500, message = "Profile must be at most 500 characters"))]
    pub profile: Option<String>,
}

// ============================================================================
// Article Requests
// ============================================================================

/// Create article request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 20000, message = "Body must be 1-20000 characters"))]
    pub body: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 tags per article"))]
    pub tags: Vec<String>,
}

/// Article listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleListQuery {
    pub title: Option<String>,
    pub body: Option<String>,
    pub search: Option<String>,
}

impl From<ArticleListQuery> for ArticleFilter {
    fn from(query: ArticleListQuery) -> Self {
        Self {
            title: query.title,
            body: query.body,
            search: query.search,
        }
    }
}

/// Administrative bulk soft-delete
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModerationDeleteRequest {
    #[validate(length(min = 1, max = 100, message = "Select 1-100 articles"))]
    pub article_ids: Vec<Snowflake>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Top-level comment on an article
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub article_id: Snowflake,

    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
}

/// Reply addressed to a user inside a thread
///
/// `root` and `parent` are both zero (or omitted) for a reply that starts a
/// new thread, or both set for a reply inside one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyRequest {
    pub article_id: Snowflake,

    /// User being replied to
    pub be_mid: Snowflake,

    #[serde(default)]
    pub root: Snowflake,

    #[serde(default)]
    pub parent: Snowflake,

    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
}
