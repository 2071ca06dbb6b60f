//! Domain values flowing between the API client, the queue and the email sender.

use serde::{Deserialize, Serialize};

/// Stable identifier assigned to a taker by the scoring API.
pub type TakerId = i64;

/// Minimum score (percent) a taker needs to receive a thank-you email.
pub const MIN_PASSING_PERCENT: f64 = 80.0;

/// A candidate who completed a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taker {
    /// Unique taker identifier.
    pub id: TakerId,
    /// Contact name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Score in percent, 0 to 100.
    pub percent: f64,
    /// Raw points scored.
    pub points: f64,
    /// Demo submissions never receive emails.
    pub demo: bool,
}

impl Taker {
    /// Whether this taker passed and is a real (non-demo) candidate.
    #[must_use]
    pub fn should_send_thanks(&self) -> bool {
        !self.demo && self.percent >= MIN_PASSING_PERCENT
    }

    /// Recipient address for this taker.
    #[must_use]
    pub fn recipient(&self) -> EmailAddress {
        EmailAddress::new(self.name.clone(), self.email.clone())
    }
}

/// Named email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    /// Display name.
    pub name: String,
    /// Mailbox address.
    pub address: String,
}

impl EmailAddress {
    /// Create an address from a display name and mailbox.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Subject and body of an outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}
