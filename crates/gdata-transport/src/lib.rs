//! Authenticated HTTP transport for the GData spreadsheets API.
//!
//! The object model never opens sockets itself. It talks to a [`Transport`]:
//! four verbs that take a URL (absolute, or a path relative to the service
//! URL) and return the response body, or a [`TransportError`] for any status
//! of 300 and above.
//!
//! # Architecture
//!
//! ```text
//! SpreadsheetService / feeds / entries (gdata-spreadsheets)
//!     └── Arc<dyn Transport>
//!           └── HttpTransport (this crate, reqwest blocking client)
//! ```
//!
//! One transport is shared by every object of a session; tests substitute
//! their own implementation of the trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use gdata_transport::{HttpTransport, Transport, TransportConfig};
//!
//! # fn example() -> gdata_transport::Result<()> {
//! let transport = HttpTransport::new(TransportConfig::new("ya29.token").with_token_type("Bearer"))?;
//! let feed = transport.get("feeds/spreadsheets/private/full")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use config::TransportConfig;
pub use error::{check_status, Result, TransportError};
pub use http::HttpTransport;
pub use transport::{Method, SharedTransport, Transport, ATOM_CONTENT_TYPE};
