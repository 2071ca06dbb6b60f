//! Queue backends.

pub mod file;
pub mod memory;

pub use file::FileQueue;
pub use memory::InMemoryQueue;
