//! # forum-core
//!
//! Domain layer of the forum interaction engine: entities, value objects,
//! the error taxonomy and the ports (repository, unit-of-work, cache and
//! queue traits) implemented by the infrastructure crates.
//! This crate has zero dependencies on infrastructure (database, cache, web framework).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    compose_mention, Article, ArticleFilter, Comment, Notification, NotificationVerb, Tag,
    ThreadPosition, User,
};
pub use error::DomainError;
pub use traits::{
    ArticleRepository, CommentRepository, DeliveryQueue, ForumTransaction,
    NotificationRepository, RepoResult, TagRepository, TransactionManager, UserRepository,
    ViewCounterStore,
};
pub use value_objects::{Page, PageRequest, Snowflake, SnowflakeGenerator, SnowflakeParseError};
