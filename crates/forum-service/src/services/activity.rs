//! User activity overview

use forum_core::{DomainError, Snowflake};
use tracing::instrument;

use crate::dto::{ActivityResponse, ArticleResponse, CommentResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct ActivityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A user's alive articles and every comment they wrote, newest first
    #[instrument(skip(self))]
    pub async fn activities(&self, user_id: Snowflake) -> ServiceResult<ActivityResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let articles = self.ctx.article_repo().find_alive_by_author(user_id).await?;
        let comments = self.ctx.comment_repo().find_by_author(user_id).await?;

        Ok(ActivityResponse {
            user_id: user.id,
            username: user.username,
            points: user.points,
            articles: articles.into_iter().map(ArticleResponse::from).collect(),
            comments: comments.into_iter().map(CommentResponse::from).collect(),
        })
    }
}
