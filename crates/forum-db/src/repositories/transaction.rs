//! PostgreSQL unit of work
//!
//! One [`PgForumTransaction`] wraps one `sqlx` transaction. Dropping it
//! without committing rolls every statement back.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use forum_core::entities::{Article, Comment, Tag, User};
use forum_core::traits::{ForumTransaction, RepoResult, TransactionManager};
use forum_core::value_objects::Snowflake;

use crate::mappers::{CommentInsert, TagBatch};
use crate::models::{ArticleModel, CommentModel, UserModel};

use super::error::{article_not_found, map_db_error, map_fk_violation, map_tx_error, user_not_found};

/// Opens transactions on a PostgreSQL pool
#[derive(Clone)]
pub struct PgTransactionManager {
    pool: PgPool,
}

impl PgTransactionManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for PgTransactionManager {
    async fn begin(&self) -> RepoResult<Box<dyn ForumTransaction>> {
        let tx = self.pool.begin().await.map_err(map_tx_error)?;
        Ok(Box::new(PgForumTransaction { tx }))
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

pub struct PgForumTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ForumTransaction for PgForumTransaction {
    #[instrument(skip(self))]
    async fn find_user(&mut self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, profile, points, is_staff, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    // The UPDATE takes the row lock, so concurrent adjustments to one user
    // apply one after another.
    #[instrument(skip(self))]
    async fn adjust_points(&mut self, user_id: Snowflake, delta: i64) -> RepoResult<i64> {
        let points = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE users
            SET points = points + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING points
            ",
        )
        .bind(user_id.into_inner())
        .bind(delta)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        points.ok_or_else(|| user_not_found(user_id))
    }

    #[instrument(skip(self, article), fields(article_id = %article.id))]
    async fn insert_article(&mut self, article: &Article) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO articles (id, title, body, author_id, alive, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(article.id.into_inner())
        .bind(&article.title)
        .bind(&article.body)
        .bind(article.author_id.into_inner())
        .bind(article.alive)
        .bind(article.created_at)
        .bind(article.modified_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_fk_violation(e, |_| user_not_found(article.author_id)))?;

        Ok(())
    }

    #[instrument(skip(self, tags), fields(count = tags.len()))]
    async fn insert_tags(&mut self, tags: &[Tag]) -> RepoResult<()> {
        if tags.is_empty() {
            return Ok(());
        }

        let article_id = tags[0].article_id;
        let batch = TagBatch::new(tags);
        sqlx::query(
            r"
            INSERT INTO tags (id, article_id, name)
            SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[], $3::TEXT[])
            ",
        )
        .bind(&batch.ids)
        .bind(&batch.article_ids)
        .bind(&batch.names)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_fk_violation(e, |_| article_not_found(article_id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn lock_article(&mut self, id: Snowflake) -> RepoResult<Option<Article>> {
        let result = sqlx::query_as::<_, ArticleModel>(
            r"
            SELECT id, title, body, author_id, alive, created_at, modified_at
            FROM articles
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Article::from))
    }

    #[instrument(skip(self))]
    async fn set_article_alive(&mut self, id: Snowflake, alive: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE articles
            SET alive = $2, modified_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(alive)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(article_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_comment(&mut self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, article_id, author_id, content, like_count, be_mid, root, parent,
                   created_at, modified_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        let row = CommentInsert::new(comment);
        sqlx::query(
            r"
            INSERT INTO comments (id, article_id, author_id, content, like_count, be_mid, root, parent,
                                  created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(row.id)
        .bind(row.article_id)
        .bind(row.author_id)
        .bind(row.content)
        .bind(row.like_count)
        .bind(row.be_mid)
        .bind(row.root)
        .bind(row.parent)
        .bind(comment.created_at)
        .bind(comment.modified_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            map_fk_violation(e, |constraint| match constraint {
                Some("comments_article_id_fkey") => article_not_found(comment.article_id),
                _ => user_not_found(comment.author_id),
            })
        })?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_tx_error)?;
        debug!("transaction committed");
        Ok(())
    }
}
