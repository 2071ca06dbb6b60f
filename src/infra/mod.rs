//! Infrastructure adapters for the queue, the dedup set and email delivery.

pub mod email;
pub mod queue;
#[cfg(feature = "redis")]
pub mod redis_store;
pub mod set;

pub use email::LogSender;
pub use queue::{FileQueue, InMemoryQueue};
#[cfg(feature = "redis")]
pub use redis_store::RedisStore;
pub use set::{FileIdSet, InMemoryIdSet};
