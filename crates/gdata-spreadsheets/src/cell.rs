//! Cell entries and their coordinates.

use std::fmt;

use gdata_atom::escape::{escape_attr, escape_text};
use gdata_atom::{ns, rel, IntoElement, XmlElement};
use gdata_transport::{Method, SharedTransport};
use lazy_regex::regex_captures;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CellLocationError, Result, SpreadsheetError};
use crate::util;

/// A 1-based cell position, as it appears in cell ids (`R2C3`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellLocation {
    pub row: u32,
    pub col: u32,
}

impl CellLocation {
    /// Create a location, rejecting row or column 0.
    pub fn new(row: u32, col: u32) -> Result<Self> {
        if row == 0 || col == 0 {
            return Err(SpreadsheetError::InvalidCoordinates { row, col });
        }
        Ok(Self { row, col })
    }

    /// Derive the location from a cell entry id ending in `/R<row>C<col>`.
    ///
    /// # Examples
    /// ```
    /// use gdata_spreadsheets::CellLocation;
    ///
    /// let loc = CellLocation::from_id(
    ///     "https://spreadsheets.google.com/feeds/cells/key/od6/private/full/R12C3",
    /// ).unwrap();
    /// assert_eq!((loc.row, loc.col), (12, 3));
    /// ```
    pub fn from_id(id: &str) -> std::result::Result<Self, CellLocationError> {
        let error = || CellLocationError { id: id.to_string() };
        let (_, row, col) = regex_captures!(r"/R(\d+)C(\d+)$", id).ok_or_else(error)?;
        let row: u32 = row.parse().map_err(|_| error())?;
        let col: u32 = col.parse().map_err(|_| error())?;
        if row == 0 || col == 0 {
            return Err(error());
        }
        Ok(Self { row, col })
    }

    /// `R{row}C{col}`, the key cells are filed under in a feed.
    pub fn cell_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.row, self.col)
    }
}

/// The `<entry>` body that sets one cell's input value.
///
/// `id` and `edit` are included when the target is an existing entry.
pub(crate) fn cell_update_xml(location: CellLocation, value: &str, existing: Option<(&str, &str)>) -> String {
    let mut xml = format!(
        r#"<entry xmlns="{atom}" xmlns:gs="{gs}">"#,
        atom = ns::ATOM,
        gs = ns::SPREADSHEETS
    );
    if let Some((id, edit)) = existing {
        xml.push_str(&format!(
            r#"<id>{}</id><link rel="edit" type="application/atom+xml" href="{}"/>"#,
            escape_text(id),
            escape_attr(edit)
        ));
    }
    xml.push_str(&format!(
        r#"<gs:cell row="{}" col="{}" inputValue="{}"/></entry>"#,
        location.row,
        location.col,
        escape_attr(value)
    ));
    xml
}

/// One cell of a cell feed.
///
/// The row and column are derived from the entry id when the entry is built;
/// an id without `R<row>C<col>` is rejected.
#[derive(Clone)]
pub struct CellEntry {
    xml: XmlElement,
    id: String,
    location: CellLocation,
    content: String,
    post_url: Option<String>,
    transport: SharedTransport,
}

impl CellEntry {
    /// Build an entry from raw XML or an element of a cell feed.
    ///
    /// `post_url` is the post URL of the owning feed, if known.
    pub fn new<X: IntoElement>(transport: SharedTransport, xml: X, post_url: Option<String>) -> Result<Self> {
        let xml = util::element("cell entry", xml)?;
        let id = util::required_id("cell entry", &xml)?;
        let location = CellLocation::from_id(&id)?;
        let content = xml.child_text(ns::ATOM, "content").unwrap_or_default().to_string();

        Ok(Self {
            xml,
            id,
            location,
            content,
            post_url,
            transport,
        })
    }

    pub fn xml(&self) -> &XmlElement {
        &self.xml
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// A1-style title such as `B3`
    pub fn title(&self) -> &str {
        util::title(&self.xml)
    }

    pub fn location(&self) -> CellLocation {
        self.location
    }

    pub fn row(&self) -> u32 {
        self.location.row
    }

    pub fn column(&self) -> u32 {
        self.location.col
    }

    /// `R{row}C{col}`
    pub fn cell_id(&self) -> String {
        self.location.cell_id()
    }

    /// The cell's value.
    ///
    /// Starts as the evaluated display value from the feed; [`set_content`]
    /// replaces it with the value a batch request will write.
    ///
    /// [`set_content`]: CellEntry::set_content
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content<S: Into<String>>(&mut self, value: S) {
        self.content = value.into();
    }

    /// Raw input (formula or literal) from `gs:cell/@inputValue`
    pub fn input_value(&self) -> Option<&str> {
        self.xml
            .child(ns::SPREADSHEETS, "cell")
            .and_then(|cell| cell.attribute("inputValue"))
    }

    pub fn edit_url(&self) -> Result<&str> {
        util::link(&self.xml, rel::EDIT)
    }

    /// Post URL of the feed this cell came from
    pub fn post_url(&self) -> Option<&str> {
        self.post_url.as_deref()
    }

    pub fn set_post_url<S: Into<String>>(&mut self, url: S) {
        self.post_url = Some(url.into());
    }

    /// Write `value` to the cell and reload this entry from the response.
    ///
    /// The row and column of the reloaded entry come from the returned id.
    /// On any failure the entry is left untouched.
    pub fn update(&mut self, value: &str) -> Result<()> {
        let edit_url = self.edit_url()?.to_string();
        let body = cell_update_xml(self.location, value, Some((self.id.as_str(), edit_url.as_str())));

        tracing::debug!("updating cell {} via {edit_url}", self.location);
        let response = util::send(self.transport.as_ref(), Method::Put, &edit_url, &body)?;

        let updated = CellEntry::new(self.transport.clone(), response, self.post_url.clone())?;
        *self = updated;
        Ok(())
    }
}

impl fmt::Debug for CellEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellEntry")
            .field("id", &self.id)
            .field("location", &self.location)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}
