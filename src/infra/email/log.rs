//! Email sender that only logs the delivery.

use anyhow::bail;
use async_trait::async_trait;
use tracing::info;

use crate::core::{AppResult, EmailAddress, EmailMessage, EmailSender};

/// Logs each email instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSender;

impl LogSender {
    /// Create a sender.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for LogSender {
    async fn send_email(
        &self,
        to: &EmailAddress,
        from: &EmailAddress,
        message: &EmailMessage,
    ) -> AppResult<()> {
        if to.address.is_empty() {
            bail!("receiver email address is empty");
        }

        info!(
            to = %to.address,
            to_name = %to.name,
            from = %from.address,
            subject = %message.subject,
            "email sent"
        );
        Ok(())
    }
}
