//! Business logic services
//!
//! The interaction-state engine: reputation, article lifecycle, comment
//! threads, view counting and notification dispatch, plus accounts and the
//! read-side helpers the API exposes around them.

pub mod activity;
pub mod article;
pub mod comment;
pub mod context;
pub mod error;
pub mod health;
pub mod notification;
pub mod reputation;
pub mod user;
pub mod view_counter;

#[cfg(test)]
pub(crate) mod testing;

pub use activity::ActivityService;
pub use article::ArticleService;
pub use comment::{CommentService, ReplyDraft};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use notification::{DeliveryPayload, NotificationDispatcher};
pub use reputation::ReputationLedger;
pub use user::UserService;
pub use view_counter::ViewCounter;
