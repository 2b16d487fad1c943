//! List feeds: a worksheet read as rows keyed by header name.
//!
//! Row values live in `gsx:` elements whose local names are the column
//! headers, lowercased with everything but alphanumerics, `_`, `-` and `.`
//! removed. [`column_key`] applies the same transform on both the read and
//! the write side, so a row read from a feed can be written back as-is.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use gdata_atom::escape::{cdata, escape_text};
use gdata_atom::{ns, rel, IntoElement, XmlElement};
use gdata_transport::{Method, SharedTransport};

use crate::error::{Result, SpreadsheetError};
use crate::util;

/// Turn a column header into the tag name used for it in `gsx:` elements.
///
/// # Examples
/// ```
/// use gdata_spreadsheets::column_key;
///
/// assert_eq!(column_key("First Name").unwrap(), "firstname");
/// assert_eq!(column_key("2013 total").unwrap(), "_2013total");
/// assert!(column_key("  ").is_err());
/// ```
pub fn column_key(name: &str) -> Result<String> {
    let mut key: String = name
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();

    match key.chars().next() {
        None => return Err(SpreadsheetError::InvalidColumnName(name.to_string())),
        Some(first) if first.is_numeric() || first == '-' || first == '.' => key.insert(0, '_'),
        Some(_) => {}
    }
    Ok(key)
}

/// Column/value pairs of one row, in document order.
fn read_row(xml: &XmlElement) -> Vec<(String, String)> {
    xml.children_in(ns::EXTENDED)
        .map(|col| {
            let key = column_key(col.name()).unwrap_or_else(|_| col.name().to_string());
            (key, col.text().to_string())
        })
        .collect()
}

/// Align a row to a column vector, `None` where the row has no value.
fn align(columns: &[String], row: &[(String, String)]) -> Vec<(String, Option<String>)> {
    columns
        .iter()
        .map(|col| {
            let value = row.iter().find(|(key, _)| key == col).map(|(_, v)| v.clone());
            (col.clone(), value)
        })
        .collect()
}

/// One row of a list feed.
#[derive(Clone)]
pub struct ListEntry {
    xml: XmlElement,
    id: String,
    updated: Option<DateTime<Utc>>,
    values: Vec<(String, Option<String>)>,
    transport: SharedTransport,
}

impl ListEntry {
    /// Build a row from raw XML or an element of a list feed.
    ///
    /// On its own a row only knows the columns it has values for; rows
    /// obtained from a [`ListFeed`] are aligned to the feed's columns.
    pub fn new<X: IntoElement>(transport: SharedTransport, xml: X) -> Result<Self> {
        let xml = util::element("list entry", xml)?;
        let row = read_row(&xml);
        let columns: Vec<String> = row.iter().map(|(key, _)| key.clone()).collect();
        Self::aligned(transport, xml, &columns)
    }

    fn aligned(transport: SharedTransport, xml: XmlElement, columns: &[String]) -> Result<Self> {
        let id = util::required_id("list entry", &xml)?;
        let updated = util::updated(&xml)?;
        let values = align(columns, &read_row(&xml));
        Ok(Self {
            xml,
            id,
            updated,
            values,
            transport,
        })
    }

    pub fn xml(&self) -> &XmlElement {
        &self.xml
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Value of the row's first column, as the service titles it
    pub fn title(&self) -> &str {
        util::title(&self.xml)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    pub fn edit_url(&self) -> Result<&str> {
        util::link(&self.xml, rel::EDIT)
    }

    /// Every column of the row, `None` where the row has no value.
    pub fn values(&self) -> &[(String, Option<String>)] {
        &self.values
    }

    /// Value of a column, by header name or key.
    pub fn get(&self, column: &str) -> Option<&str> {
        let key = column_key(column).ok()?;
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Populated columns as a map.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
            .collect()
    }

    /// Build the `<entry>` body for a row.
    ///
    /// Values are wrapped in CDATA and column names go through
    /// [`column_key`]. `id` is included when replacing an existing row.
    pub fn row_xml<I, K, V>(id: Option<&str>, row: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut xml = format!(r#"<entry xmlns="{}" xmlns:gsx="{}">"#, ns::ATOM, ns::EXTENDED);
        if let Some(id) = id {
            xml.push_str(&format!("<id>{}</id>", escape_text(id)));
        }
        for (column, value) in row {
            let key = column_key(column.as_ref())?;
            xml.push_str(&format!("<gsx:{key}>{}</gsx:{key}>", cdata(value.as_ref())));
        }
        xml.push_str("</entry>");
        Ok(xml)
    }

    /// Replace the whole row on the server.
    ///
    /// Columns missing from `row` are cleared. When the service answers
    /// with the new entry, this row is reloaded from it.
    pub fn update<I, K, V>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = Self::row_xml(Some(&self.id), row)?;
        let edit_url = self.edit_url()?.to_string();

        tracing::debug!("updating list row {}", self.id);
        let response = util::send(self.transport.as_ref(), Method::Put, &edit_url, &body)?;
        if response.trim().is_empty() {
            return Ok(());
        }

        let xml = util::element("list entry", response)?;
        let mut columns: Vec<String> = self.values.iter().map(|(k, _)| k.clone()).collect();
        for (key, _) in read_row(&xml) {
            if !columns.contains(&key) {
                columns.push(key);
            }
        }
        *self = Self::aligned(self.transport.clone(), xml, &columns)?;
        Ok(())
    }

    /// Delete the row. The entry is consumed: it no longer exists.
    pub fn delete(self) -> Result<()> {
        let edit_url = self.edit_url()?;
        tracing::debug!("deleting list row {}", self.id);
        util::send(self.transport.as_ref(), Method::Delete, edit_url, "")?;
        Ok(())
    }
}

impl fmt::Debug for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListEntry")
            .field("id", &self.id)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

/// A worksheet's list feed.
#[derive(Clone)]
pub struct ListFeed {
    xml: XmlElement,
    id: String,
    updated: Option<DateTime<Utc>>,
    columns: Vec<String>,
    entries: Vec<ListEntry>,
    transport: SharedTransport,
}

impl ListFeed {
    /// Parse a list feed.
    ///
    /// The column vector starts with the first row's columns; columns first
    /// seen in later rows are appended. Every row is aligned to it.
    pub fn new<X: IntoElement>(transport: SharedTransport, xml: X) -> Result<Self> {
        let xml = util::element("list feed", xml)?;
        let id = util::required_id("list feed", &xml)?;
        let updated = util::updated(&xml)?;

        let mut columns: Vec<String> = Vec::new();
        for entry in xml.children_named(ns::ATOM, "entry") {
            for (key, _) in read_row(entry) {
                if !columns.contains(&key) {
                    columns.push(key);
                }
            }
        }

        let entries = xml
            .children_named(ns::ATOM, "entry")
            .map(|entry| ListEntry::aligned(transport.clone(), entry.clone(), &columns))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            xml,
            id,
            updated,
            columns,
            entries,
            transport,
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

    pub fn post_url(&self) -> Result<&str> {
        util::link(&self.xml, rel::POST)
    }

    /// The column vector every row is aligned to
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ListEntry> {
        self.entries
    }

    /// Total number of rows matching the query, from OpenSearch metadata
    pub fn total_results(&self) -> Option<u32> {
        self.open_search("totalResults")
    }

    /// 1-based index of the first row in this page
    pub fn start_index(&self) -> Option<u32> {
        self.open_search("startIndex")
    }

    /// Append a row.
    pub fn insert<I, K, V>(&self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = ListEntry::row_xml(None, row)?;
        let post_url = self.post_url()?;

        tracing::debug!("inserting list row via {post_url}");
        util::send(self.transport.as_ref(), Method::Post, post_url, &body)?;
        Ok(())
    }

    fn open_search(&self, name: &str) -> Option<u32> {
        self.xml
            .children()
            .iter()
            .find(|el| el.name() == name && el.namespace().map_or(false, ns::is_open_search))
            .and_then(|el| el.text().trim().parse().ok())
    }
}

impl fmt::Debug for ListFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListFeed")
            .field("id", &self.id)
            .field("columns", &self.columns)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
