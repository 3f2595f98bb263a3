//! Tag entity - a label attached to one article

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: Snowflake,
    pub article_id: Snowflake,
    pub name: String,
}

impl Tag {
    pub fn new(id: Snowflake, article_id: Snowflake, name: String) -> Self {
        Self {
            id,
            article_id,
            name,
        }
    }
}
