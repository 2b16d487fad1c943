//! # gdata-atom
//!
//! Atom/GData XML plumbing for the spreadsheets client.
//!
//! This crate provides the pieces every feed and entry type is built from:
//! - [`XmlElement`] - an owned, namespace-resolved element tree parsed with quick-xml
//! - [`link_href`] - resolution of `<link rel="..." href="..."/>` relations
//! - [`escape`] - attribute, text and CDATA escaping for hand-built request bodies
//! - [`ns`] and [`rel`] - the namespace URIs and link relations GData uses
//!
//! ## Example
//!
//! ```rust
//! use gdata_atom::{link_href, rel, XmlElement};
//!
//! let entry = XmlElement::parse(
//!     r#"<entry xmlns="http://www.w3.org/2005/Atom">
//!          <id>https://example.com/feeds/cells/key/od6/private/full/R1C1</id>
//!          <link rel="edit" href="https://example.com/edit/R1C1/v1"/>
//!        </entry>"#,
//! ).unwrap();
//!
//! assert_eq!(link_href(&entry, rel::EDIT).unwrap(), "https://example.com/edit/R1C1/v1");
//! ```

pub mod element;
pub mod error;
pub mod escape;
pub mod links;
pub mod ns;

pub use element::{Descendants, IntoElement, XmlAttribute, XmlElement};
pub use error::{AtomError, AtomResult};
pub use links::{extract_endpoint, link_href, rel};
