//! Reputation ledger
//!
//! Point changes always ride inside the transaction of the business event
//! that causes them: the triggering write and the adjustment commit or roll
//! back together. Points have no floor or ceiling.

use forum_core::traits::ForumTransaction;
use forum_core::Snowflake;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Points awarded for publishing an article
pub const ARTICLE_CREATED: i64 = 1;

/// Points awarded for a top-level comment
pub const COMMENT_CREATED: i64 = 1;

/// Points taken from the author of a moderated article
pub const MODERATION_PENALTY: i64 = -2;

/// Reputation ledger
pub struct ReputationLedger<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReputationLedger<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply `delta` in a transaction of its own and return the new balance
    ///
    /// # Errors
    /// `UserNotFound` if the user does not exist, `TransactionFailed` if the
    /// commit aborts.
    #[instrument(skip(self))]
    pub async fn adjust(&self, user_id: Snowflake, delta: i64) -> ServiceResult<i64> {
        let mut tx = self.ctx.transactions().begin().await?;
        let points = Self::adjust_in(tx.as_mut(), user_id, delta).await?;
        tx.commit().await?;
        Ok(points)
    }

    /// Apply `delta` inside the caller's transaction
    ///
    /// Nothing is visible until the caller commits.
    pub async fn adjust_in(
        tx: &mut dyn ForumTransaction,
        user_id: Snowflake,
        delta: i64,
    ) -> ServiceResult<i64> {
        let points = tx.adjust_points(user_id, delta).await?;
        info!(user_id = %user_id, delta, points, "Points adjusted");
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Harness;
    use forum_core::DomainError;
    use futures::future::join_all;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adjustments_are_not_lost() {
        let h = Harness::new();
        let user_id = h.user("alice").await.id;

        let tasks = (0..50).map(|_| {
            let ctx = h.ctx.clone();
            tokio::spawn(async move { ReputationLedger::new(&ctx).adjust(user_id, 1).await })
        });
        for result in join_all(tasks).await {
            result.unwrap().unwrap();
        }

        assert_eq!(h.points(user_id).await, 50);
    }

    #[tokio::test]
    async fn test_points_may_go_negative() {
        let h = Harness::new();
        let user = h.user("bob").await;

        let ledger = ReputationLedger::new(&h.ctx);
        assert_eq!(ledger.adjust(user.id, MODERATION_PENALTY).await.unwrap(), -2);
        assert_eq!(ledger.adjust(user.id, MODERATION_PENALTY).await.unwrap(), -4);
        assert_eq!(h.points(user.id).await, -4);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let h = Harness::new();
        let err = ReputationLedger::new(&h.ctx)
            .adjust(Snowflake::new(404), 1)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_failed_commit_discards_adjustment() {
        let h = Harness::new();
        let user = h.user("carol").await;

        h.store.fail_next_commit();
        let err = ReputationLedger::new(&h.ctx)
            .adjust(user.id, 1)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::ServiceError::Domain(DomainError::TransactionFailed(_))
        ));
        assert_eq!(h.points(user.id).await, 0);
    }
}
