//! Moderation handlers
//!
//! Staff-only endpoints under `/admin`.

use axum::{extract::State, Json};
use forum_service::{ArticleResponse, ArticleService, ModerationDeleteRequest, ModerationReport};

use crate::extractors::{ArticleIdPath, AuthUser, SnowflakePath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Bulk soft-delete with author penalties
///
/// POST /admin/articles/moderation-delete
///
/// Always 200 once the moderator is authorised; per-article failures are
/// listed in the report.
pub async fn moderation_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ModerationDeleteRequest>,
) -> ApiResult<Json<ModerationReport>> {
    let service = ArticleService::new(state.service_context());
    let report = service
        .moderation_delete(auth.user_id, &request.article_ids)
        .await?;
    Ok(Json(report))
}

/// Read an article regardless of its alive flag
///
/// GET /admin/articles/{article_id}
pub async fn get_article(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<ArticleIdPath>,
) -> ApiResult<Json<ArticleResponse>> {
    let article_id = path.article_id()?;

    let service = ArticleService::new(state.service_context());
    let response = service.get_for_moderation(auth.user_id, article_id).await?;
    Ok(Json(response))
}
