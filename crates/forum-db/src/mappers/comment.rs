//! Comment entity <-> model mapper
//!
//! Thread references are `Option` in the domain and `0` in the table.

use forum_core::entities::Comment;
use forum_core::value_objects::Snowflake;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            article_id: Snowflake::new(model.article_id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            like_count: model.like_count,
            be_mid: Snowflake::new(model.be_mid).non_zero(),
            root: Snowflake::new(model.root).non_zero(),
            parent: Snowflake::new(model.parent).non_zero(),
            created_at: model.created_at,
            modified_at: model.modified_at,
        }
    }
}

fn or_zero(id: Option<Snowflake>) -> i64 {
    id.map_or(0, Snowflake::into_inner)
}

/// Comment flattened for insertion
pub struct CommentInsert<'a> {
    pub id: i64,
    pub article_id: i64,
    pub author_id: i64,
    pub content: &'a str,
    pub like_count: i64,
    pub be_mid: i64,
    pub root: i64,
    pub parent: i64,
}

impl<'a> CommentInsert<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        Self {
            id: comment.id.into_inner(),
            article_id: comment.article_id.into_inner(),
            author_id: comment.author_id.into_inner(),
            content: &comment.content,
            like_count: comment.like_count,
            be_mid: or_zero(comment.be_mid),
            root: or_zero(comment.root),
            parent: or_zero(comment.parent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_zero_columns_become_none() {
        let now = Utc::now();
        let comment = Comment::from(CommentModel {
            id: 3,
            article_id: 1,
            author_id: 2,
            content: "first".into(),
            like_count: 0,
            be_mid: 0,
            root: 0,
            parent: 0,
            created_at: now,
            modified_at: now,
        });
        assert!(comment.is_root());
        assert_eq!(comment.be_mid, None);

        let insert = CommentInsert::new(&comment);
        assert_eq!((insert.be_mid, insert.root, insert.parent), (0, 0, 0));
    }
}
