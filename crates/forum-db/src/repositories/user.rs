//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::User;
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, UserRepository};
use forum_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, profile, points, is_staff, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, username, email, profile, points, is_staff, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.profile)
        .bind(user.points)
        .bind(user.is_staff)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::ValidationError(format!("username already taken: {}", user.username))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update_profile(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET profile = $2, updated_at = $3
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.profile)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }
        Ok(())
    }
}
