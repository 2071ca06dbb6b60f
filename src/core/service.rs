//! Ingestion and dispatch logic over the injected collaborators.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};

use crate::core::{
    fatal, AppResult, EmailAddress, EmailMessage, EmailSender, IdSet, TakerApi, TakerQueue,
};

const SENDER_NAME: &str = "Toggl Hire";
const SENDER_ADDRESS: &str = "hello@hire.toggl.com";
const THANKS_SUBJECT: &str = "Thank you";
const THANKS_BODY: &str = "Thank you for applying via Toggl Hire.";

/// Loads passing takers into the queue and sends them thank-you emails.
///
/// Holds no state of its own. Queue and set failures are wrapped with
/// [`fatal`]; API and email failures are returned as plain (transient) errors.
pub struct ThanksService {
    api: Arc<dyn TakerApi>,
    email: Arc<dyn EmailSender>,
    queue: Arc<dyn TakerQueue>,
    sent: Arc<dyn IdSet>,
}

impl ThanksService {
    /// Create a service from its collaborators.
    pub fn new(
        api: Arc<dyn TakerApi>,
        email: Arc<dyn EmailSender>,
        queue: Arc<dyn TakerQueue>,
        sent: Arc<dyn IdSet>,
    ) -> Self {
        Self {
            api,
            email,
            queue,
            sent,
        }
    }

    /// Fetch all takers and enqueue the passing ones that were never queued before.
    ///
    /// Push and mark are two separate store calls. A crash between them
    /// re-queues the taker on the next cycle, so delivery is at-least-once.
    ///
    /// # Errors
    ///
    /// Listing failures are transient. Any queue or set failure is fatal.
    pub async fn load_takers(&self) -> AppResult<()> {
        debug!("loading new takers");

        let takers = self
            .api
            .list_takers()
            .await
            .context("failed to list takers")?;

        let fetched = takers.len();
        let mut eligible = 0_usize;
        let mut enqueued = 0_usize;

        for taker in takers.iter().filter(|t| t.should_send_thanks()) {
            eligible += 1;

            let already_sent = self
                .sent
                .contains(taker.id)
                .await
                .context("failed to check for id in set")
                .map_err(fatal)?;
            if already_sent {
                continue;
            }

            self.queue
                .push(taker)
                .await
                .context("failed to push taker to the queue")
                .map_err(fatal)?;

            self.sent
                .add(taker.id)
                .await
                .context("failed to add taker id to the set")
                .map_err(fatal)?;

            debug!(taker_id = taker.id, "taker enqueued");
            enqueued += 1;
        }

        info!(fetched, eligible, enqueued, "takers loaded");
        Ok(())
    }

    /// Pop one taker and email them. Returns `false` when the queue was empty.
    ///
    /// A taker whose email fails is not requeued.
    ///
    /// # Errors
    ///
    /// Queue failures are fatal. Email failures are transient.
    pub async fn send_next_thanks(&self) -> AppResult<bool> {
        let taker = self
            .queue
            .pop()
            .await
            .context("failed to pop taker")
            .map_err(fatal)?;

        let Some(taker) = taker else {
            return Ok(false);
        };

        self.email
            .send_email(&taker.recipient(), &sender_address(), &thanks_message())
            .await
            .with_context(|| format!("failed to send email to taker {}", taker.id))?;

        debug!(taker_id = taker.id, "thanks sent");
        Ok(true)
    }
}

fn sender_address() -> EmailAddress {
    EmailAddress::new(SENDER_NAME, SENDER_ADDRESS)
}

fn thanks_message() -> EmailMessage {
    EmailMessage {
        subject: THANKS_SUBJECT.into(),
        body: THANKS_BODY.into(),
    }
}

