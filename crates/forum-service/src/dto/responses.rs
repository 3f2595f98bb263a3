//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use forum_core::{NotificationVerb, Snowflake};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// Public view of an account; the e-mail address is never exposed
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Snowflake,
    pub username: String,
    pub profile: Option<String>,
    pub points: i64,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Article Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    pub id: Snowflake,
    pub title: String,
    pub body: String,
    pub author_id: Snowflake,
    pub alive: bool,
    pub tags: Vec<String>,
    /// Current view count; absent when the counter did not answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Acknowledgement of an author self-delete
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDeletedResponse {
    pub article_id: Snowflake,
    pub deleted: bool,
}

impl ArticleDeletedResponse {
    pub fn new(article_id: Snowflake) -> Self {
        Self {
            article_id,
            deleted: true,
        }
    }
}

/// Per-article outcome of a moderation batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModerationOutcome {
    pub article_id: Snowflake,
    pub deleted: bool,
    /// Author's balance after the penalty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ModerationOutcome {
    pub fn deleted(article_id: Snowflake, author_points: i64) -> Self {
        Self {
            article_id,
            deleted: true,
            author_points: Some(author_points),
            reason: None,
        }
    }

    pub fn failed(article_id: Snowflake, reason: impl Into<String>) -> Self {
        Self {
            article_id,
            deleted: false,
            author_points: None,
            reason: Some(reason.into()),
        }
    }
}

/// Result of a moderation batch, one entry per distinct requested id
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModerationReport {
    pub results: Vec<ModerationOutcome>,
}

impl ModerationReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &ModerationOutcome> {
        self.results.iter().filter(|r| r.deleted)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ModerationOutcome> {
        self.results.iter().filter(|r| !r.deleted)
    }

    pub fn outcome(&self, article_id: Snowflake) -> Option<&ModerationOutcome> {
        self.results.iter().find(|r| r.article_id == article_id)
    }
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Snowflake,
    pub article_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub like_count: i64,
    /// Mentioned user, `"0"` when none
    pub be_mid: Snowflake,
    /// Thread root, `"0"` for a root comment
    pub root: Snowflake,
    /// Immediate parent, `"0"` for a top-level comment
    pub parent: Snowflake,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: Snowflake,
    pub actor_id: Snowflake,
    pub recipient_id: Snowflake,
    pub verb: NotificationVerb,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Activity Responses
// ============================================================================

/// A user's alive articles and all of their comments
#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    pub user_id: Snowflake,
    pub username: String,
    pub points: i64,
    pub articles: Vec<ArticleResponse>,
    pub comments: Vec<CommentResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing store
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub cache: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, cache_healthy: bool) -> Self {
        Self {
            status: if database_healthy && cache_healthy {
                "ready"
            } else {
                "not_ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                cache: if cache_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
