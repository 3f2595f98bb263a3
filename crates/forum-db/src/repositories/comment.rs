//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::Comment;
use forum_core::traits::{CommentRepository, RepoResult};
use forum_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::CommentModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Page of comments where `column = value`, oldest first
    async fn page_where(
        &self,
        predicate: &'static str,
        value: i64,
        page: PageRequest,
    ) -> RepoResult<Page<Comment>> {
        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM comments WHERE {predicate}"
        ))
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, CommentModel>(&format!(
            r"
            SELECT id, article_id, author_id, content, like_count, be_mid, root, parent,
                   created_at, modified_at
            FROM comments
            WHERE {predicate}
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(value)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(Comment::from).collect(),
            page,
            total,
        ))
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, article_id, author_id, content, like_count, be_mid, root, parent,
                   created_at, modified_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn list_roots(
        &self,
        article_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Comment>> {
        self.page_where("article_id = $1 AND parent = 0", article_id.into_inner(), page)
            .await
    }

    #[instrument(skip(self))]
    async fn list_by_mention(
        &self,
        be_mid: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Comment>> {
        self.page_where("be_mid = $1", be_mid.into_inner(), page).await
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, article_id, author_id, content, like_count, be_mid, root, parent,
                   created_at, modified_at
            FROM comments
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(author_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }
}
