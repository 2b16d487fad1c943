//! Transport configuration.

use std::collections::BTreeMap;
use std::time::Duration;

/// Default base for relative endpoint paths.
pub const DEFAULT_SERVICE_URL: &str = "https://spreadsheets.google.com/";

/// Configuration for [`crate::HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// OAuth access token sent on every request.
    pub access_token: String,
    /// Scheme in `Authorization: {token_type} {access_token}`. Default: "OAuth".
    pub token_type: String,
    /// Base URL that relative paths are resolved against.
    pub service_url: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Extra headers sent on every request.
    pub headers: BTreeMap<String, String>,
    /// Verify the server's TLS certificate. Default: true.
    pub verify_tls: bool,
    /// Whole-request timeout. Default: 30 seconds.
    pub timeout: Option<Duration>,
    /// Redirects followed before giving up. Default: 10.
    pub max_redirects: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            token_type: "OAuth".to_string(),
            service_url: DEFAULT_SERVICE_URL.to_string(),
            user_agent: concat!("gdata-spreadsheets/", env!("CARGO_PKG_VERSION")).to_string(),
            headers: BTreeMap::new(),
            verify_tls: true,
            timeout: Some(Duration::from_secs(30)),
            max_redirects: 10,
        }
    }
}

impl TransportConfig {
    /// Default configuration carrying the given access token.
    pub fn new<S: Into<String>>(access_token: S) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    pub fn with_token_type<S: Into<String>>(mut self, token_type: S) -> Self {
        self.token_type = token_type.into();
        self
    }

    pub fn with_service_url<S: Into<String>>(mut self, service_url: S) -> Self {
        self.service_url = service_url.into();
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn remove_header(mut self, name: &str) -> Self {
        self.headers.remove(name);
        self
    }

    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Resolve a URL: anything not starting with `http` is a path relative
    /// to [`Self::service_url`].
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http") {
            return url.to_string();
        }
        let base = self.service_url.trim_end_matches('/');
        let path = url.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
