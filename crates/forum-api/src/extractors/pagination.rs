//! Pagination extractor
//!
//! Extracts page-number pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use forum_core::PageRequest;
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Page request taken from `?page=&page_size=`, clamped to valid bounds
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination(pub PageRequest);

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self(PageRequest::new(
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(PageRequest::DEFAULT_PAGE_SIZE),
        ))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(Pagination::from(params))
    }
}
