//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `users` table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub profile: Option<String>,
    pub points: i64,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
