//! Validated JSON extractor
//!
//! Extracts and validates JSON request bodies using the validator crate.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// Validated JSON extractor
///
/// The inner type must implement both `Deserialize` and `Validate`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| match e {
                JsonRejection::JsonDataError(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::JsonSyntaxError(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::MissingJsonContentType(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::BytesRejection(e) => ApiError::invalid_body(e.body_text()),
                _ => ApiError::invalid_body("Invalid JSON body"),
            })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use forum_service::CreateCommentRequest;

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let req = json_request(r#"{"article_id":"7","content":"hello"}"#);
        let ValidatedJson(body) = ValidatedJson::<CreateCommentRequest>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(body.content, "hello");
    }

    #[tokio::test]
    async fn test_validation_failure() {
        let req = json_request(r#"{"article_id":"7","content":""}"#);
        let err = ValidatedJson::<CreateCommentRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_syntax_error() {
        let req = json_request("{not json");
        let err = ValidatedJson::<CreateCommentRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)));
    }
}
