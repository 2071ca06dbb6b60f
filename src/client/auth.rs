use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ClientError, TakersClient};

pub(super) const PATH_AUTH: &str = "/auth/authenticate";

#[derive(Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    access_token: String,
}

impl TakersClient {
    /// Exchange the configured credentials for a bearer token and store it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] if the request fails or the response
    /// cannot be decoded. The previously held token is kept in that case.
    pub async fn authenticate(&self) -> Result<(), ClientError> {
        let request = AuthRequest {
            email: &self.email,
            password: &self.password,
        };

        let response: AuthResponse = self
            .do_request(Method::POST, PATH_AUTH, &[], Some(&request))
            .await
            .map_err(|e| ClientError::Auth(Box::new(e)))?;

        *self.token.write() = Some(response.access_token);

        debug!("authenticated against takers API");
        Ok(())
    }
}
