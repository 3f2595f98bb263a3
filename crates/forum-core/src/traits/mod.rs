//! Ports - interfaces the domain needs from infrastructure

mod ports;
mod repositories;

pub use ports::{DeliveryQueue, ViewCounterStore};
pub use repositories::{
    ArticleRepository, CommentRepository, ForumTransaction, NotificationRepository, RepoResult,
    TagRepository, TransactionManager, UserRepository,
};
