//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod articles;
pub mod comments;
pub mod health;
pub mod moderation;
pub mod notifications;
pub mod users;
