//! Pub/Sub delivery of notification payloads

mod channels;
mod memory;
mod publisher;

pub use channels::{PubSubChannel, DELIVERY_CHANNEL};
pub use memory::MemoryDeliveryQueue;
pub use publisher::Publisher;
