//! Comment service
//!
//! Top-level comments, mention replies and the two thread views. Replies
//! are listed by the user they address (`be_mid`), not by parent comment;
//! `root` and `parent` are stored for nested views but never used to
//! answer "more comments" queries.

use forum_core::traits::ForumTransaction;
use forum_core::{
    compose_mention, Article, Comment, DomainError, NotificationVerb, Page, PageRequest,
    Snowflake, ThreadPosition, User,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CommentResponse, CreateCommentRequest, ReplyRequest};

use super::article::ArticleService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationDispatcher;
use super::reputation::{ReputationLedger, COMMENT_CREATED};

/// A reply resolved against current state, ready to insert
///
/// Built from a [`ReplyRequest`] without modifying it; `content` already
/// carries the mention prefix for the addressed user's username at the
/// time of the reply.
#[derive(Debug, Clone)]
pub struct ReplyDraft {
    pub article_id: Snowflake,
    pub author_id: Snowflake,
    pub mentioned: User,
    pub position: ThreadPosition,
    pub content: String,
}

impl ReplyDraft {
    fn into_comment(self, id: Snowflake) -> Comment {
        Comment::new_reply(
            id,
            self.article_id,
            self.author_id,
            self.content,
            self.mentioned.id,
            self.position,
        )
    }
}

pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on an article
    ///
    /// The article is checked and locked inside the same transaction that
    /// stores the comment and awards the author's point, so a concurrent
    /// deletion either lands first and the comment is refused, or waits for
    /// the commit. The article's author is notified afterwards, even when
    /// they wrote the comment themselves.
    #[instrument(skip(self, request))]
    pub async fn comment(
        &self,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;

        let mut tx = self.ctx.transactions().begin().await?;
        let article = lock_alive_article(tx.as_mut(), request.article_id).await?;

        let comment = Comment::new(self.ctx.generate_id(), article.id, author_id, request.content);
        tx.insert_comment(&comment).await?;
        ReputationLedger::adjust_in(tx.as_mut(), author_id, COMMENT_CREATED).await?;
        tx.commit().await?;

        info!(comment_id = %comment.id, article_id = %article.id, "Comment created");

        NotificationDispatcher::new(self.ctx)
            .notify(
                author_id,
                article.author_id,
                NotificationVerb::Commented,
                comment.locator(),
            )
            .await;

        Ok(comment.into())
    }

    /// Reply to a user inside an article's thread
    ///
    /// Awards no points. The addressed user is notified afterwards.
    #[instrument(skip(self, request))]
    pub async fn reply(
        &self,
        author_id: Snowflake,
        request: ReplyRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;

        let mut tx = self.ctx.transactions().begin().await?;
        let draft = Self::resolve_reply(tx.as_mut(), author_id, &request).await?;
        let mentioned_id = draft.mentioned.id;
        let comment = draft.into_comment(self.ctx.generate_id());
        tx.insert_comment(&comment).await?;
        tx.commit().await?;

        info!(
            comment_id = %comment.id,
            article_id = %comment.article_id,
            be_mid = %mentioned_id,
            "Reply created"
        );

        NotificationDispatcher::new(self.ctx)
            .notify(
                author_id,
                mentioned_id,
                NotificationVerb::Replied,
                comment.locator(),
            )
            .await;

        Ok(comment.into())
    }

    /// Validate a reply request and derive what will be stored
    ///
    /// Reads go through `tx`, which keeps the article locked until the
    /// reply is committed.
    ///
    /// # Errors
    /// - `UserNotFound` when `be_mid` names no user
    /// - `ArticleNotFound` when the article is missing or deleted
    /// - `CommentNotFound` when `root` or `parent` names no comment
    /// - `InvalidThread` when the root/parent pair is inconsistent, lives on
    ///   another article, or the parent sits outside the root's thread
    pub async fn resolve_reply(
        tx: &mut dyn ForumTransaction,
        author_id: Snowflake,
        request: &ReplyRequest,
    ) -> ServiceResult<ReplyDraft> {
        let mentioned = tx
            .find_user(request.be_mid)
            .await?
            .ok_or(DomainError::UserNotFound(request.be_mid))?;

        let article = lock_alive_article(tx, request.article_id).await?;

        let position = ThreadPosition::from_ids(request.root, request.parent)?;
        if let ThreadPosition::Reply { root, parent } = position {
            let root_comment = find_on_article(tx, root, article.id).await?;
            if !root_comment.is_root() {
                return Err(DomainError::InvalidThread(format!(
                    "comment {root} is not a thread root"
                ))
                .into());
            }
            if parent != root {
                let parent_comment = find_on_article(tx, parent, article.id).await?;
                if parent_comment.thread_id() != root {
                    return Err(DomainError::InvalidThread(format!(
                        "comment {parent} is not in thread {root}"
                    ))
                    .into());
                }
            }
        }

        Ok(ReplyDraft {
            article_id: article.id,
            author_id,
            content: compose_mention(&mentioned.username, &request.content),
            mentioned,
            position,
        })
    }

    /// Top-level comments of an alive article, oldest first
    #[instrument(skip(self))]
    pub async fn list_root_comments(
        &self,
        article_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<Page<CommentResponse>> {
        ArticleService::new(self.ctx).find_alive(article_id).await?;
        let roots = self.ctx.comment_repo().list_roots(article_id, page).await?;
        Ok(roots.map(CommentResponse::from))
    }

    /// Comments whose mention anchor equals `comment_id`, oldest first
    ///
    /// The id is matched against `be_mid` as given, so this returns the
    /// replies addressed to the user with that id. Zero is the "no mention"
    /// marker of top-level comments and is rejected.
    #[instrument(skip(self))]
    pub async fn list_replies(
        &self,
        comment_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<Page<CommentResponse>> {
        if comment_id.is_zero() {
            return Err(DomainError::ValidationError(
                "anchor id must not be zero".to_string(),
            )
            .into());
        }
        let replies = self
            .ctx
            .comment_repo()
            .list_by_mention(comment_id, page)
            .await?;
        Ok(replies.map(CommentResponse::from))
    }
}

async fn lock_alive_article(
    tx: &mut dyn ForumTransaction,
    article_id: Snowflake,
) -> ServiceResult<Article> {
    let article = tx
        .lock_article(article_id)
        .await?
        .filter(Article::is_alive)
        .ok_or(DomainError::ArticleNotFound(article_id))?;
    Ok(article)
}

async fn find_on_article(
    tx: &mut dyn ForumTransaction,
    comment_id: Snowflake,
    article_id: Snowflake,
) -> ServiceResult<Comment> {
    let comment = tx
        .find_comment(comment_id)
        .await?
        .ok_or(DomainError::CommentNotFound(comment_id))?;

    if comment.article_id != article_id {
        return Err(DomainError::InvalidThread(format!(
            "comment {comment_id} belongs to another article"
        ))
        .into());
    }
    Ok(comment)
}
