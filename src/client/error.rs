//! Error types for the takers API client.

use thiserror::Error;

/// Errors produced while talking to the takers API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL could not be parsed.
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    /// Transport failure (connect, timeout, TLS, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The API answered with a non-2xx status.
    #[error("API responded with code {status}: {body}")]
    Code {
        /// HTTP status code.
        status: u16,
        /// Response body, if it could be read.
        body: String,
    },
    /// A 2xx response body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Obtaining a token failed.
    #[error("authentication failed: {0}")]
    Auth(#[source] Box<ClientError>),
    /// A page of takers could not be fetched.
    #[error("failed to load takers at offset {offset}: {source}")]
    Page {
        /// Offset of the failed page.
        offset: usize,
        /// Underlying failure.
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// HTTP status of the non-2xx response behind this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Code { status, .. } => Some(*status),
            Self::Auth(inner) | Self::Page { source: inner, .. } => inner.status(),
            _ => None,
        }
    }

    /// True for a 401 response, the only status that triggers re-authentication.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(reqwest::StatusCode::UNAUTHORIZED.as_u16())
    }
}
