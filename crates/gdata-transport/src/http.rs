//! Blocking HTTP implementation of [`Transport`] on top of reqwest.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;

use crate::config::TransportConfig;
use crate::error::{check_status, Result, TransportError};
use crate::transport::{Method, Transport, ATOM_CONTENT_TYPE};

/// The default transport: one reqwest client per session, authenticated with
/// the configured token.
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Build a transport from a configuration.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a transport with default settings for an access token.
    pub fn with_token<S: Into<String>>(access_token: S) -> Result<Self> {
        Self::new(TransportConfig::new(access_token))
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn execute(&self, method: Method, url: &str, body: Option<&str>) -> Result<String> {
        let url = self.config.resolve_url(url);
        tracing::debug!("{method} {url}");

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        request = request.header(AUTHORIZATION, self.config.authorization());
        for (name, value) in &self.config.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, ATOM_CONTENT_TYPE)
                .body(body.to_string());
        }

        let response = request.send().map_err(|e| {
            if e.is_redirect() {
                tracing::warn!("{method} {url}: redirect limit of {} exceeded", self.config.max_redirects);
                TransportError::TooManyRedirects { url: url.clone() }
            } else {
                TransportError::Http(e)
            }
        })?;

        let status = response.status().as_u16();
        let text = response.text()?;
        tracing::trace!("{method} {url} -> {status} ({} bytes)", text.len());

        check_status(status, &url, text).map_err(|e| {
            tracing::warn!("{method} {url} failed: {e}");
            e
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        self.execute(Method::Get, url, None)
    }

    fn post(&self, url: &str, body: &str) -> Result<String> {
        self.execute(Method::Post, url, Some(body))
    }

    fn put(&self, url: &str, body: &str) -> Result<String> {
        self.execute(Method::Put, url, Some(body))
    }

    fn delete(&self, url: &str) -> Result<String> {
        self.execute(Method::Delete, url, None)
    }
}
