//! Notification entity <-> model mapper

use forum_core::entities::{Notification, NotificationVerb};
use forum_core::error::DomainError;
use forum_core::value_objects::Snowflake;

use crate::models::NotificationModel;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let verb = NotificationVerb::parse(&model.verb).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown notification verb: {}", model.verb))
        })?;

        Ok(Notification {
            id: Snowflake::new(model.id),
            actor_id: Snowflake::new(model.actor_id),
            recipient_id: Snowflake::new(model.recipient_id),
            verb,
            description: model.description,
            created_at: model.created_at,
        })
    }
}
