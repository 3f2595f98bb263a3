//! Database models - SQLx-compatible structs for PostgreSQL tables

mod article;
mod comment;
mod notification;
mod tag;
mod user;

pub use article::ArticleModel;
pub use comment::CommentModel;
pub use notification::NotificationModel;
pub use tag::TagModel;
pub use user::UserModel;
