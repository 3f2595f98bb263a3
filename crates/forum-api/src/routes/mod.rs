//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{articles, comments, health, moderation, notifications, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(article_routes())
        .merge(comment_routes())
        .merge(admin_routes())
        .merge(notification_routes())
        .merge(user_routes())
}

fn article_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route("/articles/:article_id", get(articles::get_article))
        .route("/articles/:article_id/delete", get(articles::delete_article))
        .route(
            "/articles/:article_id/root_comments",
            get(articles::get_root_comments),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(comments::create_comment))
        .route("/comments/reply", post(comments::reply))
        .route(
            "/comments/:comment_id/anchor_more_comments",
            get(comments::anchor_more_comments),
        )
}

/// Staff-only routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/articles/moderation-delete",
            post(moderation::moderation_delete),
        )
        .route("/admin/articles/:article_id", get(moderation::get_article))
}

fn notification_routes() -> Router<AppState> {
    Router::new().route("/notifications", get(notifications::list_notifications))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register))
        .route(
            "/users/:user_id",
            get(users::get_user).patch(users::update_profile),
        )
        .route("/users/:user_id/activities", get(users::get_activities))
}
