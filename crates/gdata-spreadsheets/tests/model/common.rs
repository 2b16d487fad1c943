//! Common utilities for model tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gdata_spreadsheets::atom::XmlElement;
use gdata_spreadsheets::{Method, SharedTransport, Transport, TransportError};

/// A request as the model issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: Method,
    pub url: String,
    pub body: String,
}

impl Recorded {
    /// The request body parsed as XML.
    pub fn xml(&self) -> XmlElement {
        XmlElement::parse(&self.body).expect("request body should be well-formed XML")
    }
}

/// Transport that answers from a queue of canned responses.
///
/// An empty queue answers every request with an empty 2xx body.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful response body.
    pub fn respond<S: Into<String>>(&self, body: S) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
        self
    }

    /// Queue a fixture file as a response body.
    pub fn respond_fixture(&self, name: &str) -> &Self {
        self.respond(fixture(name))
    }

    /// Queue a failure.
    pub fn fail(&self, err: TransportError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was made")
    }

    fn record(&self, method: Method, url: &str, body: &str) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(Recorded {
            method,
            url: url.to_string(),
            body: body.to_string(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        self.record(Method::Get, url, "")
    }

    fn post(&self, url: &str, body: &str) -> Result<String, TransportError> {
        self.record(Method::Post, url, body)
    }

    fn put(&self, url: &str, body: &str) -> Result<String, TransportError> {
        self.record(Method::Put, url, body)
    }

    fn delete(&self, url: &str) -> Result<String, TransportError> {
        self.record(Method::Delete, url, "")
    }
}

/// The mock as the handle every model object takes.
pub fn shared(mock: &Arc<MockTransport>) -> SharedTransport {
    mock.clone()
}

/// Path of a file under `tests/fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Contents of a file under `tests/fixtures/`.
pub fn fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

pub const CELL_FEED_URL: &str =
    "https://spreadsheets.google.com/feeds/cells/15L06yklgflGRDjnN-VvhGYOoVLCH40DJoW5fFiqSTc5U/od6/private/full";

pub const LIST_FEED_URL: &str = "https://spreadsheets.google.com/feeds/list/G3345eEsfsk60/od6/private/full";

pub const WORKSHEET_EDIT_URL: &str =
    "https://spreadsheets.google.com/feeds/worksheets/tA3TdJ0RIVEem3xQZhG2Ceg/private/full/od8/0";
