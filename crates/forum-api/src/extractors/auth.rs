//! Principal extractor
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! user's id in the `x-user-id` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use forum_core::Snowflake;

use crate::response::ApiError;

/// Header carrying the authenticated user's id
pub const PRINCIPAL_HEADER: &str = "x-user-id";

/// Authenticated user for the current request
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

impl AuthUser {
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }

    fn from_parts(parts: &Parts) -> Option<Result<Self, ApiError>> {
        let raw = parts.headers.get(PRINCIPAL_HEADER)?;
        let parsed = raw
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<Snowflake>().ok())
            .filter(|id| !id.is_zero())
            .map(Self::new)
            .ok_or(ApiError::InvalidPrincipal);
        Some(parsed)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts).unwrap_or(Err(ApiError::MissingPrincipal))
    }
}

/// Optional principal
///
/// Returns None if the header is absent, or an error if it is malformed.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<Snowflake> {
        self.0.map(|u| u.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match AuthUser::from_parts(parts) {
            None => Ok(OptionalAuthUser(None)),
            Some(result) => result.map(|user| OptionalAuthUser(Some(user))),
        }
    }
}
