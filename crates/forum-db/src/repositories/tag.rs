//! PostgreSQL implementation of TagRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::Tag;
use forum_core::traits::{RepoResult, TagRepository};
use forum_core::value_objects::Snowflake;

use crate::models::TagModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    #[instrument(skip(self))]
    async fn find_by_article(&self, article_id: Snowflake) -> RepoResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagModel>(
            r"
            SELECT id, article_id, name
            FROM tags
            WHERE article_id = $1
            ORDER BY name
            ",
        )
        .bind(article_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }
}
