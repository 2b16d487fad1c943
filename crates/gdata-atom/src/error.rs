//! Error types for gdata-atom

use thiserror::Error;

/// Result type alias using [`AtomError`]
pub type AtomResult<T> = std::result::Result<T, AtomError>;

/// Errors that can occur while parsing or navigating Atom documents
#[derive(Debug, Error)]
pub enum AtomError {
    /// Low-level XML syntax error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Structurally invalid document (unbound prefix, unclosed tag, ...)
    #[error("Malformed XML: {0}")]
    Malformed(String),

    /// A required child element is absent
    #[error("Missing <{element}> element in <{parent}>")]
    MissingElement { parent: String, element: String },

    /// No `<link>` child carries the requested relation
    #[error("No link found with rel \"{rel}\"")]
    LinkNotFound { rel: String },

    /// An element's text could not be interpreted
    #[error("Invalid value {value:?} in <{element}>: {reason}")]
    InvalidValue {
        element: String,
        value: String,
        reason: String,
    },
}

impl AtomError {
    /// Create a new "malformed" error with a message
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        AtomError::Malformed(msg.into())
    }
}
