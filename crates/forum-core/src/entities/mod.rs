//! Domain entities - core forum records

mod article;
mod comment;
mod notification;
mod tag;
mod user;

pub use article::{Article, ArticleFilter};
pub use comment::{compose_mention, Comment, ThreadPosition};
pub use notification::{Notification, NotificationVerb};
pub use tag::Tag;
pub use user::User;
