//! # forum-cache
//!
//! Redis-backed infrastructure for the forum:
//!
//! - **Connection Pool**: managed Redis connections via deadpool
//! - **View Counters**: atomic per-article `INCR` counters
//! - **Pub/Sub**: notification delivery payloads published to a named channel
//!
//! Each Redis adapter has an in-process counterpart implementing the same
//! port, used by tests and local runs.
//!
//! ```ignore
//! use forum_cache::{Publisher, RedisPool, RedisViewCounter};
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let views = RedisViewCounter::new(pool.clone(), &config.views.key_prefix);
//! let queue = Publisher::new(pool);
//! ```

pub mod counter;
pub mod pool;
pub mod pubsub;

pub use counter::{MemoryViewCounter, RedisViewCounter};
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use pubsub::{MemoryDeliveryQueue, PubSubChannel, Publisher, DELIVERY_CHANNEL};
