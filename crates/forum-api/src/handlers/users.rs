//! User handlers

use axum::{extract::State, Json};
use forum_service::{
    ActivityResponse, ActivityService, RegisterUserRequest, UpdateProfileRequest, UserResponse,
    UserService,
};

use crate::extractors::{AuthUser, SnowflakePath, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /users
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// Replace the caller's own profile
///
/// PATCH /users/{user_id}
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let response = service
        .update_profile(auth.user_id, user_id, request)
        .await?;
    Ok(Json(response))
}

/// A user's alive articles and comments
///
/// GET /users/{user_id}/activities
pub async fn get_activities(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
) -> ApiResult<Json<ActivityResponse>> {
    let user_id = path.user_id()?;

    let service = ActivityService::new(state.service_context());
    let response = service.activities(user_id).await?;
    Ok(Json(response))
}
