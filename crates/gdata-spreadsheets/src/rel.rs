//! Link relations specific to the spreadsheets feeds.
//!
//! The generic Atom/GData relations (`edit`, `#post`, `#batch`) live in
//! [`gdata_atom::rel`].

/// Worksheets feed of a spreadsheet entry
pub const WORKSHEETS_FEED: &str = "http://schemas.google.com/spreadsheets/2006#worksheetsfeed";

/// List (row-oriented) feed of a worksheet
pub const LIST_FEED: &str = "http://schemas.google.com/spreadsheets/2006#listfeed";

/// Cell feed of a worksheet
pub const CELLS_FEED: &str = "http://schemas.google.com/spreadsheets/2006#cellsfeed";

/// CSV export of a worksheet
pub const EXPORT_CSV: &str = "http://schemas.google.com/spreadsheets/2006#exportcsv";
