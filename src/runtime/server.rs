//! The two long-running loops: periodic ingestion and poll-or-sleep dispatch.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::core::{is_fatal, AppResult, ThanksService};

/// Runs the load loop and the dispatch loop under one cancellation scope.
#[derive(Clone)]
pub struct Server {
    config: ServerConfig,
    service: Arc<ThanksService>,
}

impl Server {
    /// Create a server driving `service` with the given timings.
    pub fn new(config: ServerConfig, service: Arc<ThanksService>) -> Self {
        Self { config, service }
    }

    /// Run both loops until `cancel` fires or either loop hits a fatal error.
    ///
    /// Whichever loop stops first cancels the other; `run` returns once both
    /// have exited.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error. Cancellation is not an error.
    pub async fn run(&self, cancel: CancellationToken) -> AppResult<()> {
        let scope = cancel.child_token();
        let mut loops = JoinSet::new();

        {
            let server = self.clone();
            let scope = scope.clone();
            loops.spawn(async move { server.load_loop(&scope).await });
        }
        {
            let server = self.clone();
            let scope = scope.clone();
            loops.spawn(async move { server.dispatch_loop(&scope).await });
        }

        info!(
            update_interval = ?self.config.update_interval,
            poll_interval = ?self.config.poll_interval,
            "server started"
        );

        let mut first_error = None;
        while let Some(joined) = loops.join_next().await {
            scope.cancel();
            let outcome = joined.map_err(anyhow::Error::from).and_then(|r| r);
            if let Err(err) = outcome {
                first_error.get_or_insert(err);
            }
        }

        info!("server stopped");
        first_error.map_or(Ok(()), Err)
    }

    async fn load_loop(&self, cancel: &CancellationToken) -> AppResult<()> {
        let period = self.config.update_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = cancel.cancelled() => return Ok(()),
                _ = ticker.tick() => {}
            }

            let result = tokio::select! {
                () = cancel.cancelled() => return Ok(()),
                result = self.service.load_takers() => result,
            };

            match result {
                Ok(()) => {}
                Err(err) if is_fatal(&err) => {
                    error!("load loop stopping: {err:#}");
                    return Err(err);
                }
                Err(err) => warn!("failed to load takers: {err:#}"),
            }
        }
    }

    async fn dispatch_loop(&self, cancel: &CancellationToken) -> AppResult<()> {
        let timeout = self.config.send_thanks_timeout;

        loop {
            let attempt = tokio::select! {
                () = cancel.cancelled() => return Ok(()),
                attempt = tokio::time::timeout(timeout, self.service.send_next_thanks()) => attempt,
            };

            match attempt {
                Ok(Ok(true)) => continue,
                Ok(Ok(false)) => {}
                Ok(Err(err)) if is_fatal(&err) => {
                    error!("dispatch loop stopping: {err:#}");
                    return Err(err);
                }
                Ok(Err(err)) => {
                    warn!("failed to send thanks: {err:#}");
                    continue;
                }
                Err(_) => {
                    warn!(?timeout, "sending thanks timed out");
                    continue;
                }
            }

            debug!(poll_interval = ?self.config.poll_interval, "queue empty, sender will sleep");
            tokio::select! {
                () = cancel.cancelled() => return Ok(()),
                () = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }
}
