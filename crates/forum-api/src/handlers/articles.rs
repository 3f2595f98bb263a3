//! Article handlers
//!
//! Endpoints for publishing, reading, listing and self-deleting articles.

use axum::{
    extract::{Query, State},
    Json,
};
use forum_core::{DomainError, Page, Snowflake};
use forum_service::{
    ArticleDeletedResponse, ArticleListQuery, ArticleResponse, ArticleService, CommentResponse,
    CommentService, CreateArticleRequest, ServiceError,
};

use crate::extractors::{
    ArticleIdPath, AuthUser, OptionalAuthUser, Pagination, SnowflakePath, ValidatedJson,
};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Publish an article
///
/// POST /articles
pub async fn create_article(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateArticleRequest>,
) -> ApiResult<Created<Json<ArticleResponse>>> {
    let service = ArticleService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List alive articles, newest first
///
/// GET /articles?title=&body=&search=&page=&page_size=
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
    Pagination(page): Pagination,
) -> ApiResult<Json<Page<ArticleResponse>>> {
    let service = ArticleService::new(state.service_context());
    let response = service.list(&query.into(), page).await?;
    Ok(Json(response))
}

/// Read an article and count the view
///
/// GET /articles/{article_id}
pub async fn get_article(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<ArticleIdPath>,
) -> ApiResult<Json<ArticleResponse>> {
    let article_id = path.article_id()?;

    let service = ArticleService::new(state.service_context());
    let response = service.read(article_id, auth.user_id()).await?;
    Ok(Json(response))
}

/// Soft-delete one's own article
///
/// GET /articles/{article_id}/delete
///
/// Someone else's article is reported as not found.
pub async fn delete_article(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<ArticleIdPath>,
) -> ApiResult<Json<ArticleDeletedResponse>> {
    let article_id = path.article_id()?;

    let service = ArticleService::new(state.service_context());
    service
        .soft_delete(auth.user_id, article_id)
        .await
        .map_err(|e| hide_forbidden(e, article_id))?;

    Ok(Json(ArticleDeletedResponse::new(article_id)))
}

/// Top-level comments of an article
///
/// GET /articles/{article_id}/root_comments?page=&page_size=
pub async fn get_root_comments(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<ArticleIdPath>,
    Pagination(page): Pagination,
) -> ApiResult<Json<Page<CommentResponse>>> {
    let article_id = path.article_id()?;

    let service = CommentService::new(state.service_context());
    let response = service.list_root_comments(article_id, page).await?;
    Ok(Json(response))
}

fn hide_forbidden(err: ServiceError, article_id: Snowflake) -> ApiError {
    if err.is_forbidden() {
        ApiError::Domain(DomainError::ArticleNotFound(article_id))
    } else {
        ApiError::Service(err)
    }
}
