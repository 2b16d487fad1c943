//! GData batch protocol for cell feeds.
//!
//! A batch is one Atom feed with an `<entry>` per cell update, each tagged
//! with a `batch:id` so the response can be correlated back to it.

use gdata_atom::escape::{escape_attr, escape_text};
use gdata_atom::{ns, IntoElement, XmlElement};

use crate::cell::CellEntry;
use crate::cell_feed::CellFeed;
use crate::error::{Result, SpreadsheetError};
use crate::util;

/// An ordered queue of cell updates not yet sent.
///
/// Entries are neither deduplicated nor capped; the service enforces its
/// own batch size limit.
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    entries: Vec<CellEntry>,
}

impl BatchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: CellEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CellEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the queue as a batch feed targeting `feed`.
    ///
    /// Each entry gets `batch:id` `A1`, `A2`, ... in insertion order and an
    /// `update` operation carrying the cell's current content. An empty
    /// queue is an error.
    pub fn create_request_xml(&self, feed: &CellFeed) -> Result<String> {
        if self.entries.is_empty() {
            return Err(SpreadsheetError::EmptyBatch);
        }
        let post_url = feed.post_url()?;

        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><feed xmlns="{}" xmlns:batch="{}" xmlns:gs="{}"><id>{}</id>"#,
            ns::ATOM,
            ns::BATCH,
            ns::SPREADSHEETS,
            escape_text(post_url)
        );
        for (i, entry) in self.entries.iter().enumerate() {
            let id = format!("{post_url}/{}", entry.cell_id());
            let edit_url = entry.edit_url()?;
            xml.push_str(&format!(
                r#"<entry><batch:id>A{index}</batch:id><batch:operation type="update"/><id>{id}</id><link rel="edit" type="application/atom+xml" href="{edit}"/><gs:cell row="{row}" col="{col}" inputValue="{value}"/></entry>"#,
                index = i + 1,
                id = escape_text(&id),
                edit = escape_attr(edit_url),
                row = entry.row(),
                col = entry.column(),
                value = escape_attr(entry.content()),
            ));
        }
        xml.push_str("</feed>");
        Ok(xml)
    }
}

/// The parsed answer to a batch request.
#[derive(Debug, Clone)]
pub struct BatchResponse {
    xml: XmlElement,
}

impl BatchResponse {
    pub fn new<X: IntoElement>(xml: X) -> Result<Self> {
        Ok(Self {
            xml: util::element("batch response", xml)?,
        })
    }

    /// The raw response, for callers that need per-entry detail.
    pub fn xml(&self) -> &XmlElement {
        &self.xml
    }

    /// Whether any `batch:status` in the response has a code other than `200`.
    pub fn has_errors(&self) -> bool {
        self.xml
            .descendants()
            .filter(|el| el.is(ns::BATCH, "status"))
            .filter_map(|status| status.attribute("code"))
            .any(|code| code != "200")
    }
}
