//! Entry points: the only places that build endpoint paths by hand.
//!
//! Everything past the first fetch is reached through link relations in
//! the returned documents.

use gdata_atom::XmlElement;
use gdata_transport::{HttpTransport, Method, SharedTransport, TransportConfig, TransportError};
use std::sync::Arc;

use crate::cell_feed::CellFeed;
use crate::error::{Result, SpreadsheetError};
use crate::list::ListFeed;
use crate::spreadsheet::{Spreadsheet, SpreadsheetFeed};
use crate::util;
use crate::worksheet::{Worksheet, WorksheetFeed};

/// Feed of the authenticated user's spreadsheets
pub const SPREADSHEETS_ENDPOINT: &str = "feeds/spreadsheets/private/full";

/// A single entry that can be fetched by URL with
/// [`SpreadsheetService::resource_by_id`].
pub trait Resource: Sized {
    /// Used in parse errors and logs
    const KIND: &'static str;

    fn from_element(transport: SharedTransport, xml: XmlElement) -> Result<Self>;
}

impl Resource for Spreadsheet {
    const KIND: &'static str = "spreadsheet";

    fn from_element(transport: SharedTransport, xml: XmlElement) -> Result<Self> {
        Spreadsheet::new(transport, xml)
    }
}

impl Resource for Worksheet {
    const KIND: &'static str = "worksheet";

    fn from_element(transport: SharedTransport, xml: XmlElement) -> Result<Self> {
        Worksheet::new(transport, xml)
    }
}

/// Authenticated access to the user's spreadsheets.
///
/// Every object fetched through the service shares its transport.
#[derive(Clone)]
pub struct SpreadsheetService {
    transport: SharedTransport,
}

impl SpreadsheetService {
    pub fn new(transport: SharedTransport) -> Self {
        Self { transport }
    }

    /// Build a service on an [`HttpTransport`].
    pub fn from_config(config: TransportConfig) -> Result<Self> {
        let transport = HttpTransport::new(config).map_err(SpreadsheetError::Transport)?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn transport(&self) -> &SharedTransport {
        &self.transport
    }

    /// Fetch the feed of all spreadsheets.
    pub fn spreadsheet_feed(&self) -> Result<SpreadsheetFeed> {
        let xml = util::send(self.transport.as_ref(), Method::Get, SPREADSHEETS_ENDPOINT, "")?;
        SpreadsheetFeed::new(self.transport.clone(), xml)
    }

    /// Fetch one spreadsheet by key or full id URL.
    pub fn spreadsheet_by_id(&self, id: &str) -> Result<Spreadsheet> {
        let url = if id.starts_with("http") {
            id.to_string()
        } else {
            format!("{SPREADSHEETS_ENDPOINT}/{id}")
        };
        self.resource_by_id(&url)
    }

    /// Fetch a single entry by its URL.
    ///
    /// A 404 surfaces as [`SpreadsheetError::ResourceNotFound`].
    pub fn resource_by_id<R: Resource>(&self, url: &str) -> Result<R> {
        tracing::debug!("fetching {} {url}", R::KIND);
        let xml = self.transport.get(url).map_err(|source| match source {
            TransportError::NotFound { .. } => SpreadsheetError::ResourceNotFound {
                url: url.to_string(),
                source,
            },
            source => SpreadsheetError::Request {
                method: Method::Get,
                url: url.to_string(),
                source,
            },
        })?;
        let xml = util::element(R::KIND, xml)?;
        R::from_element(self.transport.clone(), xml)
    }

    /// Unauthenticated access to a published spreadsheet, on the same transport.
    pub fn public_spreadsheet(&self, key: &str) -> PublicSpreadsheetService {
        PublicSpreadsheetService::new(self.transport.clone(), key)
    }
}

/// Read-only access to a spreadsheet published to the web, scoped to its key.
#[derive(Clone)]
pub struct PublicSpreadsheetService {
    transport: SharedTransport,
    key: String,
}

impl PublicSpreadsheetService {
    pub fn new<S: Into<String>>(transport: SharedTransport, key: S) -> Self {
        Self {
            transport,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn worksheet_feed(&self) -> Result<WorksheetFeed> {
        let url = format!("feeds/worksheets/{}/public/full", self.key);
        let xml = util::send(self.transport.as_ref(), Method::Get, &url, "")?;
        WorksheetFeed::new(self.transport.clone(), xml)
    }

    pub fn list_feed(&self, worksheet_id: &str) -> Result<ListFeed> {
        let url = format!("feeds/list/{}/{worksheet_id}/public/full", self.key);
        let xml = util::send(self.transport.as_ref(), Method::Get, &url, "")?;
        ListFeed::new(self.transport.clone(), xml)
    }

    pub fn cell_feed(&self, worksheet_id: &str) -> Result<CellFeed> {
        let url = format!("feeds/cells/{}/{worksheet_id}/public/full", self.key);
        let xml = util::send(self.transport.as_ref(), Method::Get, &url, "")?;
        CellFeed::new(self.transport.clone(), xml)
    }
}
