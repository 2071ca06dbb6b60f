//! Email sender backends.

pub mod log;

pub use log::LogSender;
