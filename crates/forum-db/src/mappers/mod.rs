//! Entity to model mappers
//!
//! - `From<Model> for Entity`: database rows to domain objects
//! - `*Insert` structs: entity data flattened for binding

mod article;
mod comment;
mod notification;
mod tag;
mod user;

pub use comment::CommentInsert;
pub use tag::TagBatch;
