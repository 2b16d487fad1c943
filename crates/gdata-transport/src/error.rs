//! Error types for the transport layer.

use thiserror::Error;

/// Errors that can occur while talking to the GData service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Access token is invalid (HTTP {status}) for {url}")]
    Unauthorized { status: u16, url: String },

    #[error("Resource not found (HTTP 404): {url}")]
    NotFound { url: String },

    #[error("Error in Google request (HTTP {status}) for {url}")]
    BadRequest { status: u16, url: String, body: String },

    #[error("Redirect limit exceeded for {url}")]
    TooManyRedirects { url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TransportError {
    /// HTTP status carried by this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Unauthorized { status, .. } | TransportError::BadRequest { status, .. } => {
                Some(*status)
            }
            TransportError::NotFound { .. } => Some(404),
            TransportError::TooManyRedirects { .. } => None,
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Pass a 2xx body through, map every other status to an error.
///
/// Every status of 300 and above is an error: GData has no non-2xx
/// terminal state that carries a usable body.
pub fn check_status(status: u16, url: &str, body: String) -> Result<String> {
    let err = match status {
        0..=299 => return Ok(body),
        401 | 403 => TransportError::Unauthorized {
            status,
            url: url.to_string(),
        },
        404 => TransportError::NotFound {
            url: url.to_string(),
        },
        _ => TransportError::BadRequest {
            status,
            url: url.to_string(),
            body,
        },
    };
    Err(err)
}

pub type Result<T> = std::result::Result<T, TransportError>;
