//! Per-article view counters

mod memory;
mod redis_counter;

pub use memory::MemoryViewCounter;
pub use redis_counter::RedisViewCounter;
