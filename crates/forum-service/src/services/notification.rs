//! Notification dispatcher
//!
//! Records who acted on whom in the recipient's feed and publishes a
//! delivery payload to the outbound queue. Both sinks are best-effort: a
//! failure is logged and never reaches the operation that triggered it.

use chrono::{DateTime, Utc};
use forum_core::{DomainError, Notification, NotificationVerb, Page, PageRequest, Snowflake};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::dto::NotificationResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Payload published to the delivery channel for downstream delivery
#[derive(Debug, Serialize)]
pub struct DeliveryPayload<'a> {
    pub recipient_id: Snowflake,
    pub email: &'a str,
    pub actor_id: Snowflake,
    pub verb: NotificationVerb,
    pub description: &'a str,
    pub created_at: DateTime<Utc>,
}

pub struct NotificationDispatcher<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationDispatcher<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record and publish a notification
    ///
    /// Actor and recipient may be the same user; self-notifications are
    /// sent like any other.
    #[instrument(skip(self, description))]
    pub async fn notify(
        &self,
        actor_id: Snowflake,
        recipient_id: Snowflake,
        verb: NotificationVerb,
        description: String,
    ) {
        let notification = Notification::new(
            self.ctx.generate_id(),
            actor_id,
            recipient_id,
            verb,
            description,
        );

        if let Err(e) = self.ctx.notification_repo().create(&notification).await {
            warn!(
                recipient_id = %recipient_id,
                error = %e,
                "Failed to record notification in feed"
            );
        }

        if let Err(e) = self.deliver(&notification).await {
            warn!(recipient_id = %recipient_id, error = %e, "Notification delivery dropped");
        }
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), DomainError> {
        let recipient = self
            .ctx
            .user_repo()
            .find_by_id(notification.recipient_id)
            .await
            .map_err(|e| DomainError::DispatchFailed(e.to_string()))?
            .ok_or_else(|| {
                DomainError::DispatchFailed(format!(
                    "recipient {} no longer exists",
                    notification.recipient_id
                ))
            })?;

        let payload = serde_json::to_string(&DeliveryPayload {
            recipient_id: recipient.id,
            email: &recipient.email,
            actor_id: notification.actor_id,
            verb: notification.verb,
            description: &notification.description,
            created_at: notification.created_at,
        })
        .map_err(|e| DomainError::DispatchFailed(e.to_string()))?;

        let config = self.ctx.notification_config();
        match tokio::time::timeout(
            config.publish_timeout(),
            self.ctx.delivery_queue().publish(&config.channel, payload),
        )
        .await
        {
            Ok(Ok(())) => {
                debug!(channel = %config.channel, "Notification published");
                Ok(())
            }
            Ok(Err(e)) => Err(DomainError::DispatchFailed(e.to_string())),
            Err(_) => Err(DomainError::DispatchFailed(format!(
                "publish timed out after {}ms",
                config.publish_timeout_ms
            ))),
        }
    }

    /// The recipient's feed, newest first
    #[instrument(skip(self))]
    pub async fn list_for_recipient(
        &self,
        recipient_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<Page<NotificationResponse>> {
        let feed = self
            .ctx
            .notification_repo()
            .list_for_recipient(recipient_id, page)
            .await?;
        Ok(feed.map(NotificationResponse::from))
    }
}
