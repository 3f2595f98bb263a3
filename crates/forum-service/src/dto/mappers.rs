//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use forum_core::entities::{Article, Comment, Notification, Tag, User};
use forum_core::Snowflake;

use super::responses::{ArticleResponse, CommentResponse, NotificationResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            profile: user.profile,
            points: user.points,
            is_staff: user.is_staff,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Article Mappers
// ============================================================================

/// Article plus the data gathered around it
#[derive(Debug, Clone)]
pub struct ArticleWithDetails {
    pub article: Article,
    pub tags: Vec<Tag>,
    pub views: Option<i64>,
}

impl ArticleWithDetails {
    pub fn new(article: Article, tags: Vec<Tag>) -> Self {
        Self {
            article,
            tags,
            views: None,
        }
    }

    #[must_use]
    pub fn with_views(mut self, views: Option<i64>) -> Self {
        self.views = views;
        self
    }
}

impl From<ArticleWithDetails> for ArticleResponse {
    fn from(details: ArticleWithDetails) -> Self {
        let ArticleWithDetails {
            article,
            tags,
            views,
        } = details;
        Self {
            id: article.id,
            title: article.title,
            body: article.body,
            author_id: article.author_id,
            alive: article.alive,
            tags: tags.into_iter().map(|t| t.name).collect(),
            views,
            created_at: article.created_at,
            modified_at: article.modified_at,
        }
    }
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self::from(ArticleWithDetails::new(article, Vec::new()))
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            article_id: comment.article_id,
            author_id: comment.author_id,
            content: comment.content,
            like_count: comment.like_count,
            be_mid: comment.be_mid.unwrap_or(Snowflake::NONE),
            root: comment.root.unwrap_or(Snowflake::NONE),
            parent: comment.parent.unwrap_or(Snowflake::NONE),
            created_at: comment.created_at,
            modified_at: comment.modified_at,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            actor_id: n.actor_id,
            recipient_id: n.recipient_id,
            verb: n.verb,
            description: n.description,
            created_at: n.created_at,
        }
    }
}
