//! Axum extractors for request handling
//!
//! Custom extractors for the request principal, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser, PRINCIPAL_HEADER};
pub use pagination::{Pagination, PaginationParams};
pub use path::{ArticleIdPath, CommentIdPath, SnowflakePath, UserIdPath};
pub use validated::ValidatedJson;
