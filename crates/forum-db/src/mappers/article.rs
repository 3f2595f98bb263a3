//! Article entity <-> model mapper

use forum_core::entities::Article;
use forum_core::value_objects::Snowflake;

use crate::models::ArticleModel;

impl From<ArticleModel> for Article {
    fn from(model: ArticleModel) -> Self {
        Article {
            id: Snowflake::new(model.id),
            title: model.title,
            body: model.body,
            author_id: Snowflake::new(model.author_id),
            alive: model.alive,
            created_at: model.created_at,
            modified_at: model.modified_at,
        }
    }
}
