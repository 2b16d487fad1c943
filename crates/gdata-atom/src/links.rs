//! Link-relation resolution.
//!
//! GData feeds are navigated exclusively through `<link rel="..." href="..."/>`
//! children: the edit URL of an entry, the post URL of a feed, the worksheets
//! feed of a spreadsheet. [`link_href`] is the one place those URLs come from.

use crate::element::XmlElement;
use crate::error::{AtomError, AtomResult};
use crate::ns;

/// Link relations shared by all GData feeds.
pub mod rel {
    /// Edit URL of an entry (target of PUT and DELETE)
    pub const EDIT: &str = "edit";

    /// Canonical URL of a feed or entry
    pub const SELF: &str = "self";

    /// Where new entries are POSTed
    pub const POST: &str = "http://schemas.google.com/g/2005#post";

    /// Where batch feeds are POSTed
    pub const BATCH: &str = "http://schemas.google.com/g/2005#batch";

    /// The feed an entry belongs to
    pub const FEED: &str = "http://schemas.google.com/g/2005#feed";
}

/// Return the `href` of the first direct `<link>` child whose `rel` equals
/// `rel` exactly.
///
/// Later links with the same relation are never consulted. A missing
/// relation is an error, never an empty string.
pub fn link_href<'a>(element: &'a XmlElement, rel: &str) -> AtomResult<&'a str> {
    for link in element.children_named(ns::ATOM, "link") {
        if link.attribute("rel") != Some(rel) {
            continue;
        }
        match link.attribute("href") {
            Some(href) => return Ok(href),
            None => log::warn!("skipping <link rel=\"{rel}\"> without href"),
        }
    }
    Err(AtomError::LinkNotFound {
        rel: rel.to_string(),
    })
}

/// Extract the path component from a full URL.
///
/// `https://spreadsheets.google.com/feeds/worksheets/key/private/full` becomes
/// `/feeds/worksheets/key/private/full`. Query and fragment are dropped. A
/// value without a scheme is treated as a path already.
pub fn extract_endpoint(url: &str) -> &str {
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => url,
    };
    let end = path.find(|c| c == '?' || c == '#').unwrap_or(path.len());
    &path[..end]
}
