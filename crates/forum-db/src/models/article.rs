//! Article database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `articles` table
#[derive(Debug, Clone, FromRow)]
pub struct ArticleModel {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub alive: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
