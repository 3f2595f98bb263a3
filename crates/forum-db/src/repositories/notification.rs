//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::Notification;
use forum_core::error::DomainError;
use forum_core::traits::{NotificationRepository, RepoResult};
use forum_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::NotificationModel;

use super::error::{map_db_error, map_fk_violation};

#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(recipient_id = %notification.recipient_id))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO notifications (id, actor_id, recipient_id, verb, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(notification.id.into_inner())
        .bind(notification.actor_id.into_inner())
        .bind(notification.recipient_id.into_inner())
        .bind(notification.verb.as_str())
        .bind(&notification.description)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_fk_violation(e, |_| DomainError::UserNotFound(notification.recipient_id))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_for_recipient(
        &self,
        recipient_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Notification>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1",
        )
        .bind(recipient_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, actor_id, recipient_id, verb, description, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(recipient_id.into_inner())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let items = rows
            .into_iter()
            .map(Notification::try_from)
            .collect::<RepoResult<Vec<_>>>()?;

        Ok(Page::new(items, page, total))
    }
}
