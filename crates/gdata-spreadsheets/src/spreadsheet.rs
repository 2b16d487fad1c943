//! Spreadsheets and the spreadsheet feed.

use std::fmt;

use chrono::{DateTime, Utc};
use gdata_atom::{ns, IntoElement, XmlElement};
use gdata_transport::{Method, SharedTransport};

use crate::error::{Result, SpreadsheetError};
use crate::rel as sheets_rel;
use crate::util;
use crate::worksheet::{worksheet_xml, Worksheet, WorksheetFeed};

/// Rows of a worksheet created by [`Spreadsheet::add_worksheet_default`]
pub const DEFAULT_ROW_COUNT: u32 = 100;

/// Columns of a worksheet created by [`Spreadsheet::add_worksheet_default`]
pub const DEFAULT_COL_COUNT: u32 = 10;

/// A spreadsheet (document) entry.
#[derive(Clone)]
pub struct Spreadsheet {
    xml: XmlElement,
    id: String,
    updated: Option<DateTime<Utc>>,
    transport: SharedTransport,
}

impl Spreadsheet {
    pub fn new<X: IntoElement>(transport: SharedTransport, xml: X) -> Result<Self> {
        let xml = util::element("spreadsheet", xml)?;
        let id = util::required_id("spreadsheet", &xml)?;
        let updated = util::updated(&xml)?;
        Ok(Self {
            xml,
            id,
            updated,
            transport,
        })
    }

    pub fn xml(&self) -> &XmlElement {
        &self.xml
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Document key: the last segment of the id URL
    pub fn key(&self) -> &str {
        util::last_segment(&self.id)
    }

    pub fn title(&self) -> &str {
        util::title(&self.xml)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    pub fn worksheets_feed_url(&self) -> Result<&str> {
        util::link(&self.xml, sheets_rel::WORKSHEETS_FEED)
    }

    /// Fetch the worksheet feed.
    pub fn worksheets(&self) -> Result<WorksheetFeed> {
        let xml = util::send(self.transport.as_ref(), Method::Get, self.worksheets_feed_url()?, "")?;
        WorksheetFeed::new(self.transport.clone(), xml)
    }

    /// Fetch the worksheet feed and pick a worksheet by title.
    pub fn worksheet_by_title(&self, title: &str) -> Result<Worksheet> {
        self.worksheets()?.by_title(title).cloned()
    }

    /// Create a worksheet and return it as the service reports it.
    pub fn add_worksheet(&self, title: &str, row_count: u32, col_count: u32) -> Result<Worksheet> {
        let feed_url = self.worksheets_feed_url()?;
        let body = worksheet_xml(None, title, col_count, row_count);

        tracing::debug!("adding worksheet {title:?} ({col_count}x{row_count}) to {}", self.id);
        let response = util::send(self.transport.as_ref(), Method::Post, feed_url, &body)?;
        Worksheet::new(self.transport.clone(), response)
    }

    /// [`Spreadsheet::add_worksheet`] with 100 rows and 10 columns.
    pub fn add_worksheet_default(&self, title: &str) -> Result<Worksheet> {
        self.add_worksheet(title, DEFAULT_ROW_COUNT, DEFAULT_COL_COUNT)
    }
}

impl fmt::Debug for Spreadsheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spreadsheet")
            .field("id", &self.id)
            .field("title", &self.title())
            .finish_non_exhaustive()
    }
}

/// The spreadsheets visible to the authenticated user.
#[derive(Clone)]
pub struct SpreadsheetFeed {
    xml: XmlElement,
    id: String,
    updated: Option<DateTime<Utc>>,
    entries: Vec<Spreadsheet>,
}

impl SpreadsheetFeed {
    pub fn new<X: IntoElement>(transport: SharedTransport, xml: X) -> Result<Self> {
        let xml = util::element("spreadsheet feed", xml)?;
        let id = util::required_id("spreadsheet feed", &xml)?;
        let updated = util::updated(&xml)?;
        let entries = xml
            .children_named(ns::ATOM, "entry")
            .map(|entry| Spreadsheet::new(transport.clone(), entry))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            xml,
            id,
            updated,
            entries,
        })
    }

    pub fn xml(&self) -> &XmlElement {
        &self.xml
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        util::title(&self.xml)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    pub fn entries(&self) -> &[Spreadsheet] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Spreadsheet> {
        self.entries
    }

    /// First spreadsheet with this title, if any.
    pub fn find_by_title(&self, title: &str) -> Option<&Spreadsheet> {
        self.entries.iter().find(|s| s.title() == title)
    }

    /// First spreadsheet with this title.
    pub fn by_title(&self, title: &str) -> Result<&Spreadsheet> {
        self.find_by_title(title)
            .ok_or_else(|| SpreadsheetError::SpreadsheetNotFound(title.to_string()))
    }

    /// Spreadsheet by full id URL or key, if any.
    pub fn find_by_id(&self, id: &str) -> Option<&Spreadsheet> {
        self.entries.iter().find(|s| s.id() == id || s.key() == id)
    }

    /// Spreadsheet by full id URL or key.
    pub fn by_id(&self, id: &str) -> Result<&Spreadsheet> {
        self.find_by_id(id)
            .ok_or_else(|| SpreadsheetError::SpreadsheetNotFound(id.to_string()))
    }
}

impl fmt::Debug for SpreadsheetFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpreadsheetFeed")
            .field("id", &self.id)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
