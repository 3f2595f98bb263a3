//! Tag entity <-> model mapper

use forum_core::entities::Tag;
use forum_core::value_objects::Snowflake;

use crate::models::TagModel;

impl From<TagModel> for Tag {
    fn from(model: TagModel) -> Self {
        Tag {
            id: Snowflake::new(model.id),
            article_id: Snowflake::new(model.article_id),
            name: model.name,
        }
    }
}

/// Tags split into parallel columns for a single `UNNEST` insert
#[derive(Debug, Default)]
pub struct TagBatch {
    pub ids: Vec<i64>,
    pub article_ids: Vec<i64>,
    pub names: Vec<String>,
}

impl TagBatch {
    pub fn new(tags: &[Tag]) -> Self {
        let mut batch = Self::default();
        for tag in tags {
            batch.ids.push(tag.id.into_inner());
            batch.article_ids.push(tag.article_id.into_inner());
            batch.names.push(tag.name.clone());
        }
        batch
    }
}
