//! In-process implementation of the persistence ports
//!
//! Used by service tests, the HTTP integration tests and local runs without
//! PostgreSQL. A transaction holds the store's lock for its whole lifetime
//! and works on a private copy of the tables, so transactions are
//! serialisable and an uncommitted one leaves no trace.

mod store;

pub use store::{MemoryStore, MemoryTransaction};
