//! Error handling utilities for repositories

use forum_core::error::DomainError;
use forum_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a foreign-key violation through `on_fk` (which receives the violated
/// constraint name), anything else to a database error
pub fn map_fk_violation<F>(e: SqlxError, on_fk: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_fk(db_err.constraint());
        }
    }
    map_db_error(e)
}

/// Map a unique violation through `on_unique`, anything else to a
/// database error
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Commit/rollback failures abort the whole unit of work
pub fn map_tx_error(e: SqlxError) -> DomainError {
    DomainError::TransactionFailed(e.to_string())
}

pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

pub fn article_not_found(id: Snowflake) -> DomainError {
    DomainError::ArticleNotFound(id)
}
