//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub actor_id: i64,
    pub recipient_id: i64,
    pub verb: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
