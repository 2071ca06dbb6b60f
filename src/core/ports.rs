//! Collaborator traits the services are written against.
//!
//! Concrete implementations (HTTP client, store backends, email sender) are
//! injected at construction as `Arc<dyn Trait>`.

use async_trait::async_trait;

use crate::core::{AppResult, EmailAddress, EmailMessage, StoreError, Taker, TakerId};

/// Source of taker records.
#[async_trait]
pub trait TakerApi: Send + Sync {
    /// Obtain a fresh credential for subsequent requests.
    async fn authenticate(&self) -> AppResult<()>;
    /// Fetch every taker, deduplicated by id, in API order.
    async fn list_takers(&self) -> AppResult<Vec<Taker>>;
}

/// FIFO of takers waiting for a thank-you email.
#[async_trait]
pub trait TakerQueue: Send + Sync {
    /// Append a taker to the tail.
    async fn push(&self, taker: &Taker) -> Result<(), StoreError>;
    /// Remove the head. `Ok(None)` means the queue is empty, which is not an error.
    async fn pop(&self) -> Result<Option<Taker>, StoreError>;
}

/// Set of taker ids that were already queued.
#[async_trait]
pub trait IdSet: Send + Sync {
    /// Record an id.
    async fn add(&self, id: TakerId) -> Result<(), StoreError>;
    /// Check whether an id was recorded.
    async fn contains(&self, id: TakerId) -> Result<bool, StoreError>;
}

/// Delivers a single email, one attempt.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send `message` from `from` to `to`.
    async fn send_email(
        &self,
        to: &EmailAddress,
        from: &EmailAddress,
        message: &EmailMessage,
    ) -> AppResult<()>;
}
