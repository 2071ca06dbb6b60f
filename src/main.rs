//! `sender` binary: loads configuration, wires the service and runs it until a
//! termination signal or a fatal error.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use thanks_sender::builders::build_store;
use thanks_sender::client::TakersClient;
use thanks_sender::config::AppConfig;
use thanks_sender::core::{AppResult, ThanksService};
use thanks_sender::infra::LogSender;
use thanks_sender::runtime::{run_until_signal, Exit, Server, MAX_GRACE_PERIOD};
use thanks_sender::util::init_tracing;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_level);

    match run(config).await {
        Ok(Exit::Signal(name)) => {
            info!(signal = name, "terminated normally due to signal");
            ExitCode::SUCCESS
        }
        Ok(Exit::Stopped) => {
            info!("service stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("terminated with error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> AppResult<Exit> {
    info!(api = %config.takers_api, store = ?config.store, "starting sender");

    let client = TakersClient::new(
        &config.takers_api,
        &config.email,
        &config.password,
        config.http_timeout,
    )
    .context("failed to build takers API client")?;

    // Listing re-authenticates on 401, so a failure here is not fatal.
    if let Err(err) = client.authenticate().await {
        warn!("initial authentication failed: {err}");
    }

    let store = build_store(&config.store)
        .await
        .context("store unavailable")?;

    let service = ThanksService::new(
        Arc::new(client),
        Arc::new(LogSender::new()),
        store.queue,
        store.sent,
    );
    let server = Server::new(config.server, Arc::new(service));

    run_until_signal(server, MAX_GRACE_PERIOD).await
}
