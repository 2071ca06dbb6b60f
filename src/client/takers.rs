use std::collections::HashSet;

use reqwest::Method;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::{ClientError, TakersClient};
use crate::core::{Taker, TakerId};

pub(super) const PATH_TAKERS: &str = "/test-takers";

/// Number of records requested per page.
pub const PAGE_SIZE: usize = 10;

/// Taker record as served by the API. Only the fields the domain needs are kept.
#[derive(Debug, Deserialize)]
struct RawTaker {
    id: TakerId,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    is_demo: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    points: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    contact_info: ContactInfo,
}

#[derive(Debug, Default, Deserialize)]
struct ContactInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    contact_email: String,
}

#[derive(Debug, Deserialize)]
struct TakersPage {
    #[serde(default, deserialize_with = "null_as_default")]
    test_takers: Vec<RawTaker>,
    #[serde(default, deserialize_with = "null_as_default")]
    total: usize,
}

/// Read JSON `null` as the type's default, the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawTaker {
    /// Prefer the contact details, fall back to the account ones when blank.
    fn into_domain(self) -> Taker {
        let email = if self.contact_info.contact_email.is_empty() {
            self.email
        } else {
            self.contact_info.contact_email
        };
        let name = if self.contact_info.full_name.is_empty() {
            self.name
        } else {
            self.contact_info.full_name
        };

        Taker {
            id: self.id,
            name,
            email,
            percent: self.percent,
            points: self.points,
            demo: self.is_demo,
        }
    }
}

impl TakersClient {
    /// Fetch one page. A 401 triggers one re-authentication and one retry;
    /// a second 401 is returned as is.
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<TakersPage, ClientError> {
        let query = [("offset", offset.to_string()), ("limit", limit.to_string())];

        match self
            .do_request::<(), _>(Method::GET, PATH_TAKERS, &query, None)
            .await
        {
            Err(err) if err.is_unauthorized() => {
                debug!(offset, "token rejected, re-authenticating");
                self.authenticate().await?;
                self.do_request::<(), _>(Method::GET, PATH_TAKERS, &query, None)
                    .await
            }
            other => other,
        }
    }

    /// Fetch every taker page by page and map them to domain values.
    ///
    /// The server-reported `total` is re-read after each page. Records are
    /// deduplicated by id across pages, since concurrent writes on the server
    /// can shift pagination while the fetch runs.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Page`] for the first page that could not be fetched.
    pub async fn list_takers(&self) -> Result<Vec<Taker>, ClientError> {
        let mut total = PAGE_SIZE;
        let mut offset = 0;
        let mut seen = HashSet::new();
        let mut takers = Vec::with_capacity(PAGE_SIZE);

        while offset < total {
            let page = self
                .fetch_page(offset, PAGE_SIZE)
                .await
                .map_err(|source| ClientError::Page {
                    offset,
                    source: Box::new(source),
                })?;

            debug!(offset, total = page.total, received = page.test_takers.len(), "takers page loaded");

            for raw in page.test_takers {
                if seen.insert(raw.id) {
                    takers.push(raw.into_domain());
                }
            }

            total = page.total;
            offset += PAGE_SIZE;
        }

        Ok(takers)
    }
}
