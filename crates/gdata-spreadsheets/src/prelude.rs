//! Prelude module - common imports for gdata-spreadsheets users
//!
//! ```rust
//! use gdata_spreadsheets::prelude::*;
//! ```

pub use crate::{
    // Batch protocol
    BatchRequest,
    BatchResponse,
    // Cells
    CellEntry,
    CellFeed,
    CellLocation,
    // Rows
    ListEntry,
    ListFeed,
    // Entry points
    PublicSpreadsheetService,
    SpreadsheetService,
    // Documents
    Spreadsheet,
    SpreadsheetError,
    SpreadsheetFeed,
    Worksheet,
    WorksheetFeed,
};

pub use crate::{HttpTransport, SharedTransport, Transport, TransportConfig};
