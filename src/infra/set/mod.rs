//! Dedup set backends.

pub mod file;
pub mod memory;

pub use file::FileIdSet;
pub use memory::InMemoryIdSet;
