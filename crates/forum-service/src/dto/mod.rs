//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ArticleListQuery, CreateArticleRequest, CreateCommentRequest, ModerationDeleteRequest,
    RegisterUserRequest, ReplyRequest, UpdateProfileRequest,
};

pub use responses::{
    ActivityResponse, ArticleDeletedResponse, ArticleResponse, CommentResponse, HealthChecks,
    HealthResponse, ModerationOutcome, ModerationReport, NotificationResponse, ReadinessResponse,
    UserResponse,
};

pub use mappers::ArticleWithDetails;
