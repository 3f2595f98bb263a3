//! Integration test utilities for the forum engine
//!
//! Spawns the REST API in-process on an ephemeral port, backed by the
//! in-memory store, view counter and delivery queue.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
