//! Scheduling loops and process-level shutdown handling.

pub mod server;
pub mod shutdown;

pub use server::Server;
pub use shutdown::{arm_watchdog, run_until, run_until_signal, wait_for_signal, Exit, MAX_GRACE_PERIOD};
