//! The transport interface the object model is written against.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// Content type of every request body the API accepts.
pub const ATOM_CONTENT_TYPE: &str = "application/atom+xml";

/// HTTP method of a GData request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performs authenticated requests against the service.
///
/// `url` is either absolute or a path relative to the service URL. Each
/// method returns the raw response body (possibly empty) for 2xx responses
/// and an error for everything else.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<String>;

    fn post(&self, url: &str, body: &str) -> Result<String>;

    fn put(&self, url: &str, body: &str) -> Result<String>;

    fn delete(&self, url: &str) -> Result<String>;

    /// Dispatch on a [`Method`]; `body` is ignored for GET and DELETE.
    fn send(&self, method: Method, url: &str, body: &str) -> Result<String> {
        match method {
            Method::Get => self.get(url),
            Method::Post => self.post(url, body),
            Method::Put => self.put(url, body),
            Method::Delete => self.delete(url),
        }
    }
}

/// The handle every feed and entry keeps to the session's transport.
pub type SharedTransport = Arc<dyn Transport>;
