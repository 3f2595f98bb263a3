//! PostgreSQL implementation of ArticleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{Article, ArticleFilter};
use forum_core::traits::{ArticleRepository, RepoResult};
use forum_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::ArticleModel;

use super::error::map_db_error;

const FILTER_CLAUSE: &str = r"
    alive
    AND ($1::TEXT IS NULL OR title = $1)
    AND ($2::TEXT IS NULL OR body = $2)
    AND ($3::TEXT IS NULL OR title ILIKE $3 OR body ILIKE $3)
";

/// `ILIKE` pattern matching `term` anywhere, with wildcards in the term escaped
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Article>> {
        let result = sqlx::query_as::<_, ArticleModel>(
            r"
            SELECT id, title, body, author_id, alive, created_at, modified_at
            FROM articles
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Article::from))
    }

    #[instrument(skip(self))]
    async fn list_alive(
        &self,
        filter: &ArticleFilter,
        page: PageRequest,
    ) -> RepoResult<Page<Article>> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(contains_pattern);

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM articles WHERE {FILTER_CLAUSE}"
        ))
        .bind(filter.title.as_deref())
        .bind(filter.body.as_deref())
        .bind(search.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, ArticleModel>(&format!(
            r"
            SELECT id, title, body, author_id, alive, created_at, modified_at
            FROM articles
            WHERE {FILTER_CLAUSE}
            ORDER BY created_at DESC, id DESC
            LIMIT $4 OFFSET $5
            "
        ))
        .bind(filter.title.as_deref())
        .bind(filter.body.as_deref())
        .bind(search.as_deref())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(Article::from).collect(),
            page,
            total,
        ))
    }

    #[instrument(skip(self))]
    async fn find_alive_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleModel>(
            r"
            SELECT id, title, body, author_id, alive, created_at, modified_at
            FROM articles
            WHERE author_id = $1 AND alive
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(author_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Article::from).collect())
    }
}
