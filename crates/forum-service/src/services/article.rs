//! Article service
//!
//! Article creation, reads, author self-delete and staff moderation.
//! A soft-deleted article is invisible to every normal read, its author
//! included; only the moderation path can still see it.

use std::collections::HashSet;

use forum_core::{Article, ArticleFilter, DomainError, Page, PageRequest, Snowflake, Tag, User};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    ArticleResponse, ArticleWithDetails, CreateArticleRequest, ModerationOutcome,
    ModerationReport,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::reputation::{ReputationLedger, ARTICLE_CREATED, MODERATION_PENALTY};
use super::view_counter::ViewCounter;

pub struct ArticleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ArticleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish an article and award its author
    ///
    /// The article, its tags and the author's point award commit together.
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: Snowflake,
        request: CreateArticleRequest,
    ) -> ServiceResult<ArticleResponse> {
        request.validate()?;
        let tag_names = normalize_tags(&request.tags)?;

        let article = Article::new(self.ctx.generate_id(), author_id, request.title, request.body);
        let tags: Vec<Tag> = tag_names
            .into_iter()
            .map(|name| Tag::new(self.ctx.generate_id(), article.id, name))
            .collect();

        let mut tx = self.ctx.transactions().begin().await?;
        tx.insert_article(&article).await?;
        tx.insert_tags(&tags).await?;
        ReputationLedger::adjust_in(tx.as_mut(), author_id, ARTICLE_CREATED).await?;
        tx.commit().await?;

        info!(article_id = %article.id, author_id = %author_id, "Article created");

        Ok(ArticleWithDetails::new(article, tags).into())
    }

    /// Fetch an alive article
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        article_id: Snowflake,
        requestor: Option<Snowflake>,
    ) -> ServiceResult<ArticleResponse> {
        let article = self.find_alive(article_id).await?;
        let tags = self.ctx.tag_repo().find_by_article(article_id).await?;
        Ok(ArticleWithDetails::new(article, tags).into())
    }

    /// Fetch an alive article and count the view
    ///
    /// The view is only counted when the article is found. The response
    /// carries the post-increment count, or no count if the cache missed.
    #[instrument(skip(self))]
    pub async fn read(
        &self,
        article_id: Snowflake,
        requestor: Option<Snowflake>,
    ) -> ServiceResult<ArticleResponse> {
        let mut response = self.get(article_id, requestor).await?;
        response.views = ViewCounter::new(self.ctx).record_view(article_id).await;
        Ok(response)
    }

    /// Alive articles matching `filter`, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &ArticleFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<ArticleResponse>> {
        let articles = self.ctx.article_repo().list_alive(filter, page).await?;

        let mut items: Vec<ArticleResponse> = Vec::with_capacity(articles.items.len());
        for article in articles.items {
            let tags = self.ctx.tag_repo().find_by_article(article.id).await?;
            items.push(ArticleWithDetails::new(article, tags).into());
        }

        Ok(Page {
            items,
            page: articles.page,
            page_size: articles.page_size,
            total: articles.total,
        })
    }

    /// Author self-delete
    ///
    /// Free of charge. Fails with `NotArticleAuthor` for anyone but the
    /// author, and with `ArticleNotFound` if the article is missing or
    /// already deleted.
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, requestor: Snowflake, article_id: Snowflake) -> ServiceResult<()> {
        let mut tx = self.ctx.transactions().begin().await?;

        let article = tx
            .lock_article(article_id)
            .await?
            .filter(Article::is_alive)
            .ok_or(DomainError::ArticleNotFound(article_id))?;

        if !article.is_author(requestor) {
            return Err(DomainError::NotArticleAuthor.into());
        }

        tx.set_article_alive(article_id, false).await?;
        tx.commit().await?;

        info!(article_id = %article_id, "Article soft-deleted by author");
        Ok(())
    }

    /// Staff bulk soft-delete with a point penalty for each author
    ///
    /// Each article is deleted and its author penalised in a transaction of
    /// its own. A failure rolls back that article only; processing carries
    /// on and the report lists every distinct id with its outcome.
    #[instrument(skip(self, article_ids), fields(count = article_ids.len()))]
    pub async fn moderation_delete(
        &self,
        moderator_id: Snowflake,
        article_ids: &[Snowflake],
    ) -> ServiceResult<ModerationReport> {
        require_staff(self.ctx, moderator_id).await?;

        let mut seen = HashSet::with_capacity(article_ids.len());
        let mut report = ModerationReport::default();

        for &article_id in article_ids {
            if !seen.insert(article_id) {
                continue;
            }

            let outcome = match self.moderate_one(article_id).await {
                Ok(points) => ModerationOutcome::deleted(article_id, points),
                Err(e) => {
                    warn!(article_id = %article_id, error = %e, "Moderation delete rolled back");
                    ModerationOutcome::failed(article_id, e.to_string())
                }
            };
            report.results.push(outcome);
        }

        info!(
            moderator_id = %moderator_id,
            deleted = report.succeeded().count(),
            failed = report.failed().count(),
            "Moderation batch processed"
        );

        Ok(report)
    }

    async fn moderate_one(&self, article_id: Snowflake) -> ServiceResult<i64> {
        let mut tx = self.ctx.transactions().begin().await?;

        let article = tx
            .lock_article(article_id)
            .await?
            .filter(Article::is_alive)
            .ok_or(DomainError::ArticleNotFound(article_id))?;

        tx.set_article_alive(article_id, false).await?;
        let points =
            ReputationLedger::adjust_in(tx.as_mut(), article.author_id, MODERATION_PENALTY).await?;
        tx.commit().await?;

        info!(
            article_id = %article_id,
            author_id = %article.author_id,
            points,
            "Article removed by moderation"
        );
        Ok(points)
    }

    /// Staff read that ignores the soft-delete flag
    #[instrument(skip(self))]
    pub async fn get_for_moderation(
        &self,
        moderator_id: Snowflake,
        article_id: Snowflake,
    ) -> ServiceResult<ArticleResponse> {
        require_staff(self.ctx, moderator_id).await?;

        let article = self
            .ctx
            .article_repo()
            .find_by_id(article_id)
            .await?
            .ok_or(DomainError::ArticleNotFound(article_id))?;
        let tags = self.ctx.tag_repo().find_by_article(article_id).await?;

        Ok(ArticleWithDetails::new(article, tags).into())
    }

    pub(crate) async fn find_alive(&self, article_id: Snowflake) -> ServiceResult<Article> {
        let article = self
            .ctx
            .article_repo()
            .find_by_id(article_id)
            .await?
            .filter(Article::is_alive)
            .ok_or(DomainError::ArticleNotFound(article_id))?;
        Ok(article)
    }
}

async fn require_staff(ctx: &ServiceContext, user_id: Snowflake) -> ServiceResult<User> {
    let user = ctx
        .user_repo()
        .find_by_id(user_id)
        .await?
        .ok_or(DomainError::UserNotFound(user_id))?;

    if !user.is_staff() {
        return Err(DomainError::NotStaff.into());
    }
    Ok(user)
}

/// Trim tag names, reject blank ones, collapse duplicates keeping first-seen order
fn normalize_tags(names: &[String]) -> Result<Vec<String>, DomainError> {
    let mut seen = HashSet::new();
    let mut tags = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::ValidationError(
                "tag names must not be empty".to_string(),
            ));
        }
        if name.chars().count() > 50 {
            return Err(DomainError::ValidationError(format!(
                "tag '{name}' is longer than 50 characters"
            )));
        }
        if seen.insert(name.to_string()) {
            tags.push(name.to_string());
        }
    }
    Ok(tags)
}
