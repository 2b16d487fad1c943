//! Error types for gdata-spreadsheets

use gdata_atom::AtomError;
use gdata_transport::{Method, TransportError};
use thiserror::Error;

/// Result type alias using [`SpreadsheetError`]
pub type Result<T> = std::result::Result<T, SpreadsheetError>;

/// A cell entry id that does not end in `R<row>C<col>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to get the location of the cell from id {id:?}")]
pub struct CellLocationError {
    pub id: String,
}

/// Errors raised by the spreadsheet object model.
///
/// Lower-level errors are always kept as the `source`, so walking
/// [`std::error::Error::source`] reaches the XML or HTTP failure underneath.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// A feed or entry document could not be parsed, or lacks a required element
    #[error("Failed to parse {what}")]
    Parse {
        what: &'static str,
        #[source]
        source: AtomError,
    },

    /// A link relation needed for navigation is missing
    #[error("Error occurred while retrieving url for rel \"{rel}\"")]
    Url {
        rel: String,
        #[source]
        source: AtomError,
    },

    /// A cell entry whose id carries no coordinates
    #[error("Invalid cell entry")]
    InvalidCell(#[from] CellLocationError),

    /// The transport rejected a request
    #[error("{method} {url} failed")]
    Request {
        method: Method,
        url: String,
        #[source]
        source: TransportError,
    },

    /// The HTTP client could not be set up
    #[error("Failed to set up transport")]
    Transport(#[source] TransportError),

    /// A single resource fetched by URL does not exist
    #[error("Resource not found: {url}")]
    ResourceNotFound {
        url: String,
        #[source]
        source: TransportError,
    },

    /// A batch request was built with no entries
    #[error("Batch request contains no entries")]
    EmptyBatch,

    /// No spreadsheet in a feed matched a title or id
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    /// No worksheet in a feed matched a title or id
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// A list-feed column name that maps to an empty tag name
    #[error("Invalid column name: {0:?}")]
    InvalidColumnName(String),

    /// Cell coordinates are 1-based
    #[error("Invalid cell coordinates R{row}C{col}")]
    InvalidCoordinates { row: u32, col: u32 },

    #[error("Invalid timestamp {value:?}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// CSV export could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SpreadsheetError {
    /// Whether the service rejected the access token (HTTP 401/403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            SpreadsheetError::Request {
                source: TransportError::Unauthorized { .. },
                ..
            }
        )
    }

    /// Whether this is a lookup miss, local or remote (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        match self {
            SpreadsheetError::ResourceNotFound { .. }
            | SpreadsheetError::SpreadsheetNotFound(_)
            | SpreadsheetError::WorksheetNotFound(_) => true,
            SpreadsheetError::Request { source, .. } => matches!(source, TransportError::NotFound { .. }),
            _ => false,
        }
    }

    pub(crate) fn parse(what: &'static str) -> impl FnOnce(AtomError) -> Self {
        move |source| SpreadsheetError::Parse { what, source }
    }

    pub(crate) fn url(rel: &str) -> impl FnOnce(AtomError) -> Self + '_ {
        move |source| SpreadsheetError::Url {
            rel: rel.to_string(),
            source,
        }
    }
}
