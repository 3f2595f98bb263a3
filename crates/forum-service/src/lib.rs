//! # forum-service
//!
//! Application layer: the services that mutate forum state, their
//! request/response DTOs and the [`ServiceContext`] dependency container.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
