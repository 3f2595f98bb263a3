//! Comment handlers
//!
//! Endpoints for commenting, replying and browsing reply anchors.

use axum::{extract::State, Json};
use forum_core::Page;
use forum_service::{CommentResponse, CommentService, CreateCommentRequest, ReplyRequest};

use crate::extractors::{AuthUser, CommentIdPath, Pagination, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Comment on an article
///
/// POST /comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service.comment(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Reply to a user in a thread
///
/// POST /comments/reply
pub async fn reply(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ReplyRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service.reply(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Comments anchored on the given id
///
/// GET /comments/{comment_id}/anchor_more_comments?page=&page_size=
pub async fn anchor_more_comments(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<CommentIdPath>,
    Pagination(page): Pagination,
) -> ApiResult<Json<Page<CommentResponse>>> {
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    let response = service.list_replies(comment_id, page).await?;
    Ok(Json(response))
}
