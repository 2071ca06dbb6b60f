//! Signal handling and graceful shutdown.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::core::AppResult;
use crate::runtime::Server;

/// How long shutdown may take after a signal before the process is killed.
pub const MAX_GRACE_PERIOD: Duration = Duration::from_secs(6);

/// Why the service stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// A termination signal was received and both loops exited.
    Signal(&'static str),
    /// The scope was cancelled without a signal.
    Stopped,
}

/// Wait for SIGINT, SIGQUIT or SIGTERM and return its name.
///
/// # Errors
///
/// Fails if the signal handlers cannot be installed.
#[cfg(unix)]
pub async fn wait_for_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut quit = signal(SignalKind::quit())?;
    let mut terminate = signal(SignalKind::terminate())?;

    let name = tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = quit.recv() => "SIGQUIT",
        _ = terminate.recv() => "SIGTERM",
    };
    Ok(name)
}

/// Wait for Ctrl-C.
///
/// # Errors
///
/// Fails if the handler cannot be installed.
#[cfg(not(unix))]
pub async fn wait_for_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl-c")
}

/// Kill the process if it is still alive after `grace`.
///
/// Runs on a plain OS thread so a wedged runtime cannot stall it.
pub fn arm_watchdog(grace: Duration) {
    std::thread::spawn(move || {
        std::thread::sleep(grace);
        error!(?grace, "service failed to shut down gracefully");
        std::process::exit(1);
    });
}

/// Run `server` until a signal arrives or a loop fails.
///
/// # Errors
///
/// Returns the server's fatal error, or the failure to install signal handlers.
pub async fn run_until_signal(server: Server, grace: Duration) -> AppResult<Exit> {
    run_until(server, wait_for_signal(), grace).await
}

/// Run `server` until `shutdown` resolves or a loop fails.
///
/// `shutdown` and the server share one token: a resolved `shutdown` cancels
/// the server, and a server failure drops `shutdown`. Both are awaited before
/// returning. A watchdog bounds shutdown to `grace` once `shutdown` resolved
/// with a signal name.
///
/// # Errors
///
/// Returns the server's fatal error, or the error `shutdown` resolved with.
pub async fn run_until<F>(server: Server, shutdown: F, grace: Duration) -> AppResult<Exit>
where
    F: Future<Output = io::Result<&'static str>>,
{
    let cancel = CancellationToken::new();

    let trap = async {
        let received = tokio::select! {
            () = cancel.cancelled() => None,
            received = shutdown => Some(received),
        };
        if let Some(Ok(name)) = received {
            info!(signal = name, "got signal, shutting down");
            arm_watchdog(grace);
        }
        cancel.cancel();
        received
    };

    let serve = async {
        let result = server.run(cancel.clone()).await;
        cancel.cancel();
        result
    };

    let (received, served) = tokio::join!(trap, serve);
    served?;

    match received {
        Some(Ok(name)) => Ok(Exit::Signal(name)),
        Some(Err(err)) => Err(anyhow::Error::from(err).context("failed to wait for a shutdown signal")),
        None => Ok(Exit::Stopped),
    }
}
