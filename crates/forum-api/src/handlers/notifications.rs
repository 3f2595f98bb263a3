//! Notification handlers

use axum::{extract::State, Json};
use forum_core::Page;
use forum_service::{NotificationDispatcher, NotificationResponse};

use crate::extractors::{AuthUser, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// The caller's notification feed, newest first
///
/// GET /notifications?page=&page_size=
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<Page<NotificationResponse>>> {
    let dispatcher = NotificationDispatcher::new(state.service_context());
    let response = dispatcher.list_for_recipient(auth.user_id, page).await?;
    Ok(Json(response))
}
