use async_trait::async_trait;
use reqwest::header::{HeaderValue, COOKIE};
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::auth::types::Credentials;
use crate::errors::request_error;
use crate::Error;

/// GET-only view of the network used by the plugin
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` with the session cookies attached, without following redirects.
    /// Returns the response body.
    async fn get(&self, url: Url, credentials: &Credentials) -> Result<String, Error>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self, Error> {
        let client = Client::builder()
            .redirect(Policy::none())
            .user_agent(user_agent)
            .build()
            .map_err(request_error)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: Url, credentials: &Credentials) -> Result<String, Error> {
        log::debug!("GET {}", url);
        let mut request = self.client.get(url);
        if !credentials.is_empty() {
            let mut cookie_header =
                HeaderValue::from_str(&credentials.cookie_header()).map_err(request_error)?;
            cookie_header.set_sensitive(true);
            request = request.header(COOKIE, cookie_header);
        }
        let response = request.send().await.map_err(request_error)?;
        let response = response.error_for_status().map_err(request_error)?;
        response.text().await.map_err(request_error)
    }
}
