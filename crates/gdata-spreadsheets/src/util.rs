//! Helpers shared by every feed and entry type.

use chrono::{DateTime, Utc};
use gdata_atom::{link_href, ns, IntoElement, XmlElement};
use gdata_transport::{Method, Transport};

use crate::error::{Result, SpreadsheetError};

/// Parse raw XML (or take an already-parsed element) for a `what`.
pub(crate) fn element<X: IntoElement>(what: &'static str, xml: X) -> Result<XmlElement> {
    xml.into_element().map_err(SpreadsheetError::parse(what))
}

/// The `<id>` every feed and entry must carry.
pub(crate) fn required_id(what: &'static str, xml: &XmlElement) -> Result<String> {
    let id = xml
        .required_text(ns::ATOM, "id")
        .map_err(SpreadsheetError::parse(what))?;
    Ok(id.trim().to_string())
}

pub(crate) fn title(xml: &XmlElement) -> &str {
    xml.child_text(ns::ATOM, "title").unwrap_or_default()
}

/// `<updated>` as a UTC timestamp, if the document carries one.
pub(crate) fn updated(xml: &XmlElement) -> Result<Option<DateTime<Utc>>> {
    let Some(value) = xml.child_text(ns::ATOM, "updated") else {
        return Ok(None);
    };
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|ts| Some(ts.with_timezone(&Utc)))
        .map_err(|source| SpreadsheetError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

/// Resolve a link relation, wrapping a miss into a domain error.
pub(crate) fn link<'a>(xml: &'a XmlElement, rel: &str) -> Result<&'a str> {
    link_href(xml, rel).map_err(SpreadsheetError::url(rel))
}

/// Last path segment of an id URL (`.../private/full/od6` -> `od6`).
pub(crate) fn last_segment(id: &str) -> &str {
    let id = id.trim_end_matches('/');
    id.rsplit('/').next().unwrap_or(id)
}

/// Issue a request and wrap a transport failure with the method and URL.
pub(crate) fn send(transport: &dyn Transport, method: Method, url: &str, body: &str) -> Result<String> {
    transport
        .send(method, url, body)
        .map_err(|source| SpreadsheetError::Request {
            method,
            url: url.to_string(),
            source,
        })
}

/// Append form-encoded query parameters to a feed URL.
pub(crate) fn with_query(url: &str, query: &[(&str, &str)]) -> Result<String> {
    if query.is_empty() {
        return Ok(url.to_string());
    }
    url::Url::parse_with_params(url, query)
        .map(String::from)
        .map_err(|e| SpreadsheetError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
}
