//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use forum_core::Snowflake;
use serde::{de::DeserializeOwned, Deserialize};

use crate::response::ApiError;

/// Path extractor whose rejection is an [`ApiError`]
#[derive(Debug, Clone)]
pub struct SnowflakePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SnowflakePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(SnowflakePath(inner))
    }
}

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with article_id
#[derive(Debug, Deserialize)]
pub struct ArticleIdPath {
    pub article_id: String,
}

impl ArticleIdPath {
    pub fn article_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.article_id, "article_id")
    }
}

/// Path parameters with comment_id
#[derive(Debug, Deserialize)]
pub struct CommentIdPath {
    pub comment_id: String,
}

impl CommentIdPath {
    pub fn comment_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.comment_id, "comment_id")
    }
}

/// Path parameters with user_id
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let path = ArticleIdPath {
            article_id: "123".to_string(),
        };
        assert_eq!(path.article_id().unwrap(), Snowflake::new(123));
    }

    #[test]
    fn test_parse_invalid_id() {
        let path = CommentIdPath {
            comment_id: "nope".to_string(),
        };
        assert!(matches!(
            path.comment_id(),
            Err(ApiError::InvalidPath(msg)) if msg.contains("comment_id")
        ));
    }
}
