//! # Thanks Sender
//!
//! A small service that thanks test takers who passed.
//!
//! It periodically pulls test takers from a scoring API, keeps the ones who
//! scored at least 80% on a real (non-demo) test, deduplicates them against
//! takers that were already handled, and queues them. A second loop drains the
//! queue and sends each taker a thank-you email.
//!
//! ## Moving Parts
//!
//! - **[`client::TakersClient`]**: authenticated, paginated client for the
//!   scoring API. Re-authenticates once on a `401` and retries the page.
//! - **[`core::ThanksService`]**: `load_takers` (list, filter, dedupe, enqueue)
//!   and `send_next_thanks` (pop, email).
//! - **[`runtime::Server`]**: runs both operations as concurrent loops under a
//!   single cancellation token.
//! - **Stores**: in-memory, JSON-lines files, or Redis (feature `redis`).
//!
//! ## Failure Model
//!
//! Errors are either transient (logged, the loop carries on) or fatal (the
//! whole service stops). Queue and dedup-set failures are fatal, since carrying
//! on could notify a taker twice or lose one. API and email failures are
//! transient. The fatal marker survives any amount of context wrapping:
//!
//! ```rust
//! use anyhow::Context;
//! use thanks_sender::core::{fatal, is_fatal, StoreError};
//!
//! let err = Err::<(), _>(fatal(StoreError::Backend("down".into())))
//!     .context("failed to push taker")
//!     .unwrap_err();
//! assert!(is_fatal(&err));
//! ```
//!
//! ## Wiring
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use thanks_sender::builders::build_store;
//! use thanks_sender::client::TakersClient;
//! use thanks_sender::core::ThanksService;
//! use thanks_sender::infra::LogSender;
//! use thanks_sender::runtime::{run_until_signal, Server, MAX_GRACE_PERIOD};
//!
//! let client = TakersClient::new(&cfg.takers_api, &cfg.email, &cfg.password, cfg.http_timeout)?;
//! let store = build_store(&cfg.store).await?;
//! let service = ThanksService::new(Arc::new(client), Arc::new(LogSender::new()), store.queue, store.sent);
//! let exit = run_until_signal(Server::new(cfg.server, Arc::new(service)), MAX_GRACE_PERIOD).await?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Domain types, collaborator traits, errors and the service.
pub mod core;
/// Configuration models and environment loading.
pub mod config;
/// Builders to construct components from configuration.
pub mod builders;
/// HTTP client for the takers API.
pub mod client;
/// Store and email backends.
pub mod infra;
/// Scheduling loops and shutdown handling.
pub mod runtime;
/// Shared utilities.
pub mod util;
