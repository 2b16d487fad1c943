//! # gdata-spreadsheets
//!
//! Client object model for the (legacy) Google Spreadsheets GData API.
//!
//! Feeds and entries are typed views over the Atom documents the service
//! returns. Navigation follows the `<link rel="...">` relations inside those
//! documents, and mutations serialize the exact GData XML the API expects:
//! - [`SpreadsheetService`] / [`PublicSpreadsheetService`] - entry points
//! - [`SpreadsheetFeed`], [`Spreadsheet`] - documents and their worksheets
//! - [`WorksheetFeed`], [`Worksheet`] - tabs: size, title, CSV export, feeds
//! - [`ListFeed`], [`ListEntry`] - rows keyed by column header
//! - [`CellFeed`], [`CellEntry`] - individual cells, single and batch edits
//! - [`BatchRequest`], [`BatchResponse`] - the GData batch protocol
//!
//! Every object holds the [`SharedTransport`] it was fetched with; tests and
//! applications plug in their own [`Transport`] implementation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gdata_spreadsheets::prelude::*;
//!
//! # fn example() -> gdata_spreadsheets::Result<()> {
//! let service = SpreadsheetService::from_config(TransportConfig::new("ya29.token"))?;
//! let spreadsheet = service.spreadsheet_feed()?.by_title("Budget")?.clone();
//! let worksheet = spreadsheet.worksheet_by_title("Sheet1")?;
//!
//! let cells = worksheet.cell_feed(&[])?;
//! if let Some(cell) = cells.cell(1, 1)? {
//!     println!("A1 = {}", cell.content());
//! }
//!
//! let rows = worksheet.list_feed(&[("sq", "age > 45")])?;
//! rows.insert([("name", "Asim"), ("age", "46")])?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cell;
pub mod cell_feed;
pub mod error;
pub mod list;
pub mod prelude;
pub mod rel;
pub mod service;
pub mod spreadsheet;
pub mod worksheet;

mod util;

pub use batch::{BatchRequest, BatchResponse};
pub use cell::{CellEntry, CellLocation};
pub use cell_feed::CellFeed;
pub use error::{CellLocationError, Result, SpreadsheetError};
pub use list::{column_key, ListEntry, ListFeed};
pub use service::{PublicSpreadsheetService, Resource, SpreadsheetService, SPREADSHEETS_ENDPOINT};
pub use spreadsheet::{Spreadsheet, SpreadsheetFeed, DEFAULT_COL_COUNT, DEFAULT_ROW_COUNT};
pub use worksheet::{Worksheet, WorksheetFeed};

// The XML and transport layers, for callers that inspect raw documents or
// supply their own transport.
pub use gdata_atom::{self as atom, XmlElement};
pub use gdata_transport::{
    self as transport, HttpTransport, Method, SharedTransport, Transport, TransportConfig,
    TransportError,
};
