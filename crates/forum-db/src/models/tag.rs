//! Tag database model

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TagModel {
    pub id: i64,
    pub article_id: i64,
    pub name: String,
}
