//! Worksheets and worksheet feeds.

use std::fmt;

use chrono::{DateTime, Utc};
use gdata_atom::escape::escape_text;
use gdata_atom::{ns, rel, IntoElement, XmlElement};
use gdata_transport::{Method, SharedTransport};

use crate::cell_feed::CellFeed;
use crate::error::{Result, SpreadsheetError};
use crate::list::ListFeed;
use crate::rel as sheets_rel;
use crate::util;

/// The `<entry>` body describing a worksheet's title and size.
pub(crate) fn worksheet_xml(id: Option<&str>, title: &str, col_count: u32, row_count: u32) -> String {
    let id = id
        .map(|id| format!("<id>{}</id>", escape_text(id)))
        .unwrap_or_default();
    format!(
        r#"<entry xmlns="{atom}" xmlns:gs="{gs}">{id}<title type="text">{title}</title><gs:colCount>{col_count}</gs:colCount><gs:rowCount>{row_count}</gs:rowCount></entry>"#,
        atom = ns::ATOM,
        gs = ns::SPREADSHEETS,
        title = escape_text(title),
    )
}

/// One worksheet (tab) of a spreadsheet.
#[derive(Clone)]
pub struct Worksheet {
    xml: XmlElement,
    id: String,
    updated: Option<DateTime<Utc>>,
    transport: SharedTransport,
}

impl Worksheet {
    pub fn new<X: IntoElement>(transport: SharedTransport, xml: X) -> Result<Self> {
        let xml = util::element("worksheet", xml)?;
        let id = util::required_id("worksheet", &xml)?;
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

    /// Full id URL
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Short id such as `od6`, the last segment of [`Worksheet::id`]
    pub fn worksheet_id(&self) -> &str {
        util::last_segment(&self.id)
    }

    /// The `gid` of the worksheet, taken from its CSV export link.
    pub fn gid(&self) -> Result<String> {
        let export = self.export_csv_url()?;
        let url = url::Url::parse(export).map_err(|e| SpreadsheetError::InvalidUrl {
            url: export.to_string(),
            reason: e.to_string(),
        })?;
        url.query_pairs()
            .find(|(name, _)| name == "gid")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| SpreadsheetError::InvalidUrl {
                url: export.to_string(),
                reason: "no gid query parameter".to_string(),
            })
    }

    pub fn title(&self) -> &str {
        util::title(&self.xml)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    pub fn row_count(&self) -> Result<u32> {
        self.xml
            .parse_child(ns::SPREADSHEETS, "rowCount")
            .map_err(SpreadsheetError::parse("worksheet"))
    }

    pub fn col_count(&self) -> Result<u32> {
        self.xml
            .parse_child(ns::SPREADSHEETS, "colCount")
            .map_err(SpreadsheetError::parse("worksheet"))
    }

    pub fn edit_url(&self) -> Result<&str> {
        util::link(&self.xml, rel::EDIT)
    }

    pub fn list_feed_url(&self) -> Result<&str> {
        util::link(&self.xml, sheets_rel::LIST_FEED)
    }

    pub fn cell_feed_url(&self) -> Result<&str> {
        util::link(&self.xml, sheets_rel::CELLS_FEED)
    }

    pub fn export_csv_url(&self) -> Result<&str> {
        util::link(&self.xml, sheets_rel::EXPORT_CSV)
    }

    /// Fetch the list feed.
    ///
    /// `query` is appended form-encoded, e.g. `[("reverse", "true"), ("sq", "age > 45")]`.
    pub fn list_feed(&self, query: &[(&str, &str)]) -> Result<ListFeed> {
        let url = util::with_query(self.list_feed_url()?, query)?;
        let xml = util::send(self.transport.as_ref(), Method::Get, &url, "")?;
        ListFeed::new(self.transport.clone(), xml)
    }

    /// Fetch the cell feed, e.g. with `[("min-row", "2"), ("max-col", "4")]`.
    pub fn cell_feed(&self, query: &[(&str, &str)]) -> Result<CellFeed> {
        let url = util::with_query(self.cell_feed_url()?, query)?;
        let xml = util::send(self.transport.as_ref(), Method::Get, &url, "")?;
        CellFeed::new(self.transport.clone(), xml)
    }

    /// The worksheet exported as CSV text.
    pub fn csv(&self) -> Result<String> {
        util::send(self.transport.as_ref(), Method::Get, self.export_csv_url()?, "")
    }

    /// The CSV export split into records.
    pub fn csv_rows(&self) -> Result<Vec<Vec<String>>> {
        let csv = self.csv()?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(csv.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    /// Write header titles into row 1, one cell per heading.
    pub fn create_header<I, S>(&self, headings: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let feed = self.cell_feed(&[])?;
        for (col, heading) in (1u32..).zip(headings) {
            feed.edit_cell(1, col, heading.as_ref())?;
        }
        Ok(())
    }

    /// Change the title and/or size of the worksheet.
    ///
    /// Omitted values keep the worksheet's current ones; the request always
    /// carries all three.
    pub fn update(&mut self, title: Option<&str>, col_count: Option<u32>, row_count: Option<u32>) -> Result<()> {
        let title = title.unwrap_or_else(|| self.title()).to_string();
        let col_count = match col_count {
            Some(count) => count,
            None => self.col_count()?,
        };
        let row_count = match row_count {
            Some(count) => count,
            None => self.row_count()?,
        };
        let body = worksheet_xml(Some(&self.id), &title, col_count, row_count);
        let edit_url = self.edit_url()?.to_string();

        tracing::debug!("updating worksheet {} to {title:?} {col_count}x{row_count}", self.id);
        let response = util::send(self.transport.as_ref(), Method::Put, &edit_url, &body)?;
        if !response.trim().is_empty() {
            *self = Worksheet::new(self.transport.clone(), response)?;
        }
        Ok(())
    }

    /// Delete the worksheet. The view is consumed: it no longer exists.
    pub fn delete(self) -> Result<()> {
        let edit_url = self.edit_url()?;
        tracing::debug!("deleting worksheet {}", self.id);
        util::send(self.transport.as_ref(), Method::Delete, edit_url, "")?;
        Ok(())
    }
}

impl fmt::Debug for Worksheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worksheet")
            .field("id", &self.id)
            .field("title", &self.title())
            .finish_non_exhaustive()
    }
}

/// The worksheets of one spreadsheet.
#[derive(Clone)]
pub struct WorksheetFeed {
    xml: XmlElement,
    id: String,
    updated: Option<DateTime<Utc>>,
    entries: Vec<Worksheet>,
}

impl WorksheetFeed {
    pub fn new<X: IntoElement>(transport: SharedTransport, xml: X) -> Result<Self> {
        let xml = util::element("worksheet feed", xml)?;
        let id = util::required_id("worksheet feed", &xml)?;
        let updated = util::updated(&xml)?;
        let entries = xml
            .children_named(ns::ATOM, "entry")
            .map(|entry| Worksheet::new(transport.clone(), entry))
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

    /// Where new worksheets are POSTed
    pub fn post_url(&self) -> Result<&str> {
        util::link(&self.xml, rel::POST)
    }

    pub fn cell_feed_url(&self) -> Result<&str> {
        util::link(&self.xml, sheets_rel::CELLS_FEED)
    }

    pub fn export_csv_url(&self) -> Result<&str> {
        util::link(&self.xml, sheets_rel::EXPORT_CSV)
    }

    pub fn entries(&self) -> &[Worksheet] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Worksheet> {
        self.entries
    }

    /// First worksheet with this title, if any.
    pub fn find_by_title(&self, title: &str) -> Option<&Worksheet> {
        self.entries.iter().find(|ws| ws.title() == title)
    }

    /// First worksheet with this title.
    pub fn by_title(&self, title: &str) -> Result<&Worksheet> {
        self.find_by_title(title)
            .ok_or_else(|| SpreadsheetError::WorksheetNotFound(title.to_string()))
    }

    /// Worksheet by full id URL or short id (`od6`), if any.
    pub fn find_by_id(&self, id: &str) -> Option<&Worksheet> {
        self.entries
            .iter()
            .find(|ws| ws.id() == id || ws.worksheet_id() == id)
    }

    /// Worksheet by full id URL or short id (`od6`).
    pub fn by_id(&self, id: &str) -> Result<&Worksheet> {
        self.find_by_id(id)
            .ok_or_else(|| SpreadsheetError::WorksheetNotFound(id.to_string()))
    }
}

impl fmt::Debug for WorksheetFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorksheetFeed")
            .field("id", &self.id)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
