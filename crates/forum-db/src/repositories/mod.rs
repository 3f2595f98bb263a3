//! Repository implementations
//!
//! PostgreSQL implementations of the ports defined in forum-core.

mod article;
mod comment;
mod error;
mod notification;
mod tag;
mod transaction;
mod user;

pub use article::PgArticleRepository;
pub use comment::PgCommentRepository;
pub use notification::PgNotificationRepository;
pub use tag::PgTagRepository;
pub use transaction::{PgForumTransaction, PgTransactionManager};
pub use user::PgUserRepository;
