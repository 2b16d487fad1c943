//! Cell feeds: every non-empty cell of a worksheet, one entry each.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use gdata_atom::escape::{escape_attr, escape_text};
use gdata_atom::{ns, rel, IntoElement, XmlElement};
use gdata_transport::{Method, SharedTransport};
use once_cell::unsync::OnceCell;

use crate::batch::{BatchRequest, BatchResponse};
use crate::cell::{cell_update_xml, CellEntry, CellLocation};
use crate::error::Result;
use crate::util;

/// Parsed entries plus the `R{row}C{col}` index into them.
#[derive(Clone, Default)]
struct Cells {
    entries: Vec<CellEntry>,
    index: HashMap<String, usize>,
}

/// A worksheet's cell feed.
///
/// Entries are parsed on first access and cached for the lifetime of the
/// feed; repeated calls to [`CellFeed::entries`] return the same objects.
#[derive(Clone)]
pub struct CellFeed {
    xml: XmlElement,
    id: String,
    updated: Option<DateTime<Utc>>,
    transport: SharedTransport,
    cells: OnceCell<Cells>,
}

impl CellFeed {
    pub fn new<X: IntoElement>(transport: SharedTransport, xml: X) -> Result<Self> {
        let xml = util::element("cell feed", xml)?;
        let id = util::required_id("cell feed", &xml)?;
        let updated = util::updated(&xml)?;
        Ok(Self {
            xml,
            id,
            updated,
            transport,
            cells: OnceCell::new(),
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

    /// Where single cells are POSTed
    pub fn post_url(&self) -> Result<&str> {
        util::link(&self.xml, rel::POST)
    }

    /// Where batch feeds are POSTed
    pub fn batch_url(&self) -> Result<&str> {
        util::link(&self.xml, rel::BATCH)
    }

    pub fn entries(&self) -> Result<&[CellEntry]> {
        Ok(&self.cells()?.entries)
    }

    pub fn entries_mut(&mut self) -> Result<&mut [CellEntry]> {
        self.cells()?;
        Ok(self
            .cells
            .get_mut()
            .map(|cells| cells.entries.as_mut_slice())
            .unwrap_or_default())
    }

    /// The entry at `row`/`col`, if the feed has one.
    pub fn cell(&self, row: u32, col: u32) -> Result<Option<&CellEntry>> {
        let cells = self.cells()?;
        Ok(position(cells, row, col).map(|i| &cells.entries[i]))
    }

    pub fn cell_mut(&mut self, row: u32, col: u32) -> Result<Option<&mut CellEntry>> {
        self.cells()?;
        let Some(cells) = self.cells.get_mut() else {
            return Ok(None);
        };
        Ok(position(cells, row, col).map(move |i| &mut cells.entries[i]))
    }

    /// Cell contents by row, then column.
    pub fn to_rows(&self) -> Result<BTreeMap<u32, BTreeMap<u32, String>>> {
        let mut rows: BTreeMap<u32, BTreeMap<u32, String>> = BTreeMap::new();
        for entry in self.entries()? {
            rows.entry(entry.row())
                .or_default()
                .insert(entry.column(), entry.content().to_string());
        }
        Ok(rows)
    }

    /// Set a cell's input value without going through an entry.
    pub fn edit_cell(&self, row: u32, col: u32, value: &str) -> Result<()> {
        let location = CellLocation::new(row, col)?;
        let post_url = self.post_url()?;
        let body = cell_update_xml(location, value, None);

        tracing::debug!("editing cell {location} via {post_url}");
        util::send(self.transport.as_ref(), Method::Post, post_url, &body)?;
        Ok(())
    }

    /// Build a detached entry for a cell that may not exist yet, for use in
    /// a [`BatchRequest`].
    ///
    /// Its id and edit link are `{post_url}/R{row}C{col}`.
    pub fn create_insertion_cell(&self, row: u32, col: u32, content: &str) -> Result<CellEntry> {
        let location = CellLocation::new(row, col)?;
        let post_url = self.post_url()?;
        let url = format!("{post_url}/{location}");

        let xml = format!(
            r#"<entry xmlns="{atom}" xmlns:gs="{gs}"><id>{id}</id><link rel="edit" type="application/atom+xml" href="{href}"/><content>{text}</content><gs:cell row="{row}" col="{col}" inputValue="{value}"/></entry>"#,
            atom = ns::ATOM,
            gs = ns::SPREADSHEETS,
            id = escape_text(&url),
            href = escape_attr(&url),
            text = escape_text(content),
            row = location.row,
            col = location.col,
            value = escape_attr(content),
        );
        CellEntry::new(self.transport.clone(), xml.as_str(), Some(post_url.to_string()))
    }

    /// Submit a batch of cell updates.
    pub fn update_batch(&self, batch: &BatchRequest) -> Result<BatchResponse> {
        self.submit_batch(batch)
    }

    /// Submit a batch of cells built with [`CellFeed::create_insertion_cell`].
    ///
    /// GData models inserts as updates of not-yet-existing cells, so this
    /// sends the same document as [`CellFeed::update_batch`].
    pub fn insert_batch(&self, batch: &BatchRequest) -> Result<BatchResponse> {
        self.submit_batch(batch)
    }

    fn submit_batch(&self, batch: &BatchRequest) -> Result<BatchResponse> {
        let body = batch.create_request_xml(self)?;
        let batch_url = self.batch_url()?;

        tracing::debug!("submitting batch of {} cells to {batch_url}", batch.len());
        let response = util::send(self.transport.as_ref(), Method::Post, batch_url, &body)?;
        let response = BatchResponse::new(response.as_str())?;
        if response.has_errors() {
            tracing::warn!("batch to {batch_url} reported failed entries");
        }
        Ok(response)
    }

    fn cells(&self) -> Result<&Cells> {
        self.cells.get_or_try_init(|| {
            let post_url = self.post_url().ok().map(str::to_string);
            let mut cells = Cells::default();
            for entry in self.xml.children_named(ns::ATOM, "entry") {
                let entry = CellEntry::new(self.transport.clone(), entry, post_url.clone())?;
                cells.index.insert(entry.cell_id(), cells.entries.len());
                cells.entries.push(entry);
            }
            tracing::trace!("parsed {} cells of {}", cells.entries.len(), self.id);
            Ok(cells)
        })
    }
}

/// Look a cell up by key, falling back to a scan if an update moved it.
fn position(cells: &Cells, row: u32, col: u32) -> Option<usize> {
    let location = CellLocation { row, col };
    match cells.index.get(&location.cell_id()) {
        Some(&i) if cells.entries[i].location() == location => Some(i),
        _ => cells.entries.iter().position(|e| e.location() == location),
    }
}

impl fmt::Debug for CellFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellFeed")
            .field("id", &self.id)
            .field("entries", &self.cells.get().map(|c| c.entries.len()))
            .finish_non_exhaustive()
    }
}
