//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Article not found: {0}")]
    ArticleNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not article author")]
    NotArticleAuthor,

    #[error("Staff privileges required")]
    NotStaff,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid thread reference: {0}")]
    InvalidThread(String),

    // =========================================================================
    // Unit of work / side effects
    // =========================================================================
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Notification dispatch failed: {0}")]
    DispatchFailed(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ArticleNotFound(_) => "UNKNOWN_ARTICLE",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            Self::NotArticleAuthor => "NOT_ARTICLE_AUTHOR",
            Self::NotStaff => "NOT_STAFF",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidThread(_) => "INVALID_THREAD",

            Self::TransactionFailed(_) => "TRANSACTION_FAILED",
            Self::DispatchFailed(_) => "DISPATCH_FAILED",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::ArticleNotFound(_) | Self::CommentNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidThread(_))
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotArticleAuthor | Self::NotStaff)
    }
}
