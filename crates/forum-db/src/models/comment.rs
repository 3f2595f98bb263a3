//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `comments` table
///
/// `be_mid`, `root` and `parent` are stored as `0` when unset.
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub article_id: i64,
    pub author_id: i64,
    pub content: String,
    pub like_count: i64,
    pub be_mid: i64,
    pub root: i64,
    pub parent: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
