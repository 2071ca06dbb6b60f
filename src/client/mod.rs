//! HTTP client for the takers scoring API.
//!
//! The client keeps the bearer token behind a read/write lock: request signing
//! takes a short read lock, re-authentication takes the write lock. The token is
//! never handed out.

mod auth;
pub mod error;
mod takers;

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{AppResult, Taker, TakerApi};

pub use error::ClientError;
pub use takers::PAGE_SIZE;

/// Authenticated client for the takers API.
pub struct TakersClient {
    http: reqwest::Client,
    base_url: Url,
    email: String,
    password: String,
    token: RwLock<Option<String>>,
}

impl TakersClient {
    /// Build a client with its own connection pool and per-request timeout.
    ///
    /// # Errors
    ///
    /// Fails if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        email: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_http_client(http, base_url, email, password)
    }

    /// Build a client around an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Fails if the base URL is invalid.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http,
            base_url,
            email: email.into(),
            password: password.into(),
            token: RwLock::new(None),
        })
    }

    /// Whether a token is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Join `path` onto the base URL path, keeping any prefix the base carries.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }

    /// Send one request and decode a JSON response.
    ///
    /// Attaches the bearer token when one is held. Any non-2xx status becomes
    /// [`ClientError::Code`] carrying the response body.
    async fn do_request<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.request(method, self.endpoint(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let token = self.token.read().clone();
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Code {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl TakerApi for TakersClient {
    async fn authenticate(&self) -> AppResult<()> {
        Ok(Self::authenticate(self).await?)
    }

    async fn list_takers(&self) -> AppResult<Vec<Taker>> {
        Ok(Self::list_takers(self).await?)
    }
}
