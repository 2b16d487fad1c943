//! Owned XML element tree.
//!
//! GData responses are small (one feed page at a time) and every object in
//! the spreadsheets model needs random access to its children, links and
//! namespaced extension elements, so documents are parsed once into an owned
//! tree instead of being re-scanned with a streaming reader per accessor.
//!
//! Namespaces are resolved while parsing: every element records the URI its
//! prefix was bound to, so lookups are written against URIs (see [`crate::ns`])
//! and never depend on which prefix a server chose.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{AtomError, AtomResult};
use crate::escape::{escape_attr, escape_text};
use crate::ns;

/// A single attribute, stored with its qualified name and unescaped value.
///
/// Namespace declarations (`xmlns`, `xmlns:gs`) are kept as ordinary
/// attributes so that re-serializing an element reproduces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    name: String,
    value: String,
}

impl XmlAttribute {
    /// Qualified attribute name as written in the document
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unescaped attribute value
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A parsed XML element with its attributes, text and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    prefix: Option<String>,
    name: String,
    namespace: Option<String>,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    /// Parse a complete document and return its root element.
    pub fn parse(xml: &str) -> AtomResult<Self> {
        let mut reader = Reader::from_str(xml);
        let mut scope = NamespaceScope::default();
        // Open elements, each with the number of namespace bindings it declared
        let mut stack: Vec<(XmlElement, usize)> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let (element, declared) = open_element(&e, &mut scope)?;
                    if stack.is_empty() && root.is_some() {
                        return Err(AtomError::malformed(format!(
                            "second root element <{}>",
                            element.qualified_name()
                        )));
                    }
                    stack.push((element, declared));
                }
                Event::Empty(e) => {
                    let (element, declared) = open_element(&e, &mut scope)?;
                    scope.pop(declared);
                    attach(element, &mut stack, &mut root)?;
                }
                Event::End(_) => {
                    let (mut element, declared) = stack
                        .pop()
                        .ok_or_else(|| AtomError::malformed("closing tag without an open element"))?;
                    scope.pop(declared);
                    element.finish();
                    attach(element, &mut stack, &mut root)?;
                }
                Event::Text(t) => {
                    let text = t.unescape()?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(c) => {
                    let raw = c.into_inner();
                    let text = std::str::from_utf8(&raw)
                        .map_err(|e| AtomError::malformed(format!("invalid UTF-8 in CDATA: {e}")))?;
                    push_text(&mut stack, text)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctypes
                _ => {}
            }
        }

        if let Some((open, _)) = stack.last() {
            return Err(AtomError::malformed(format!(
                "unclosed element <{}>",
                open.qualified_name()
            )));
        }

        let root = root.ok_or_else(|| AtomError::malformed("document has no root element"))?;
        log::trace!(
            "parsed <{}> with {} child elements",
            root.qualified_name(),
            root.children.len()
        );
        Ok(root)
    }

    /// Local name (without prefix)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix as written in the document
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Resolved namespace URI
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// `prefix:name`, or just `name` for unprefixed elements
    pub fn qualified_name(&self) -> Cow<'_, str> {
        match &self.prefix {
            Some(prefix) => Cow::Owned(format!("{prefix}:{}", self.name)),
            None => Cow::Borrowed(&self.name),
        }
    }

    /// Whether this element has the given namespace URI and local name.
    ///
    /// Un-namespaced elements match [`ns::ATOM`], the default namespace of
    /// every GData document, so hand-written fragments without an `xmlns`
    /// are still navigable.
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name
            && match self.namespace.as_deref() {
                Some(uri) => uri == namespace,
                None => namespace == ns::ATOM,
            }
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// Value of the attribute with the given qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Concatenated text and CDATA content of this element
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child elements in document order
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First child with the given namespace and local name
    pub fn child(&self, namespace: &str, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(namespace, name))
    }

    /// All children with the given namespace and local name
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.is(namespace, name))
    }

    /// All children in the given namespace, whatever their local name
    pub fn children_in<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children
            .iter()
            .filter(move |c| c.namespace.as_deref() == Some(namespace))
    }

    /// Text of the first matching child
    pub fn child_text(&self, namespace: &str, name: &str) -> Option<&str> {
        self.child(namespace, name).map(XmlElement::text)
    }

    /// First matching child, or [`AtomError::MissingElement`]
    pub fn required_child(&self, namespace: &str, name: &str) -> AtomResult<&XmlElement> {
        self.child(namespace, name)
            .ok_or_else(|| AtomError::MissingElement {
                parent: self.qualified_name().into_owned(),
                element: name.to_string(),
            })
    }

    /// Text of the first matching child, or [`AtomError::MissingElement`]
    pub fn required_text(&self, namespace: &str, name: &str) -> AtomResult<&str> {
        self.required_child(namespace, name).map(XmlElement::text)
    }

    /// Parse the (trimmed) text of a required child
    pub fn parse_child<T>(&self, namespace: &str, name: &str) -> AtomResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let text = self.required_text(namespace, name)?.trim();
        text.parse().map_err(|e: T::Err| AtomError::InvalidValue {
            element: name.to_string(),
            value: text.to_string(),
            reason: e.to_string(),
        })
    }

    /// Depth-first iterator over every element below this one, in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Drop indentation between child elements.
    fn finish(&mut self) {
        if !self.children.is_empty() && self.text.trim().is_empty() {
            self.text.clear();
        }
    }
}

impl FromStr for XmlElement {
    type Err = AtomError;

    fn from_str(s: &str) -> AtomResult<Self> {
        XmlElement::parse(s)
    }
}

/// Serializes the element and its subtree.
///
/// Namespaces the subtree uses but inherited from ancestors are declared on
/// the outermost element, so an entry printed on its own out of a feed parses
/// back to the same namespaces.
impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut inherited = Vec::new();
        self.collect_inherited(&mut Vec::new(), &mut inherited);
        self.write_xml(f, &inherited)
    }
}

impl XmlElement {
    /// Prefix bindings used in this subtree that no element in it declares.
    fn collect_inherited<'a>(
        &'a self,
        scope: &mut Vec<Option<&'a str>>,
        inherited: &mut Vec<(Option<&'a str>, &'a str)>,
    ) {
        let outer = scope.len();
        for attr in &self.attributes {
            if attr.name == "xmlns" {
                scope.push(None);
            } else if let Some(prefix) = attr.name.strip_prefix("xmlns:") {
                scope.push(Some(prefix));
            }
        }

        if let Some(uri) = self.namespace.as_deref() {
            let prefix = self.prefix.as_deref();
            if prefix != Some("xml") && !scope.contains(&prefix) && !inherited.iter().any(|(p, _)| *p == prefix) {
                inherited.push((prefix, uri));
            }
        }

        for child in &self.children {
            child.collect_inherited(scope, inherited);
        }
        scope.truncate(outer);
    }

    fn write_xml(&self, f: &mut fmt::Formatter<'_>, declare: &[(Option<&str>, &str)]) -> fmt::Result {
        let qname = self.qualified_name();
        write!(f, "<{qname}")?;
        for (prefix, uri) in declare {
            match prefix {
                Some(prefix) => write!(f, " xmlns:{prefix}=\"{}\"", escape_attr(uri))?,
                None => write!(f, " xmlns=\"{}\"", escape_attr(uri))?,
            }
        }
        for attr in &self.attributes {
            write!(f, " {}=\"{}\"", attr.name, escape_attr(&attr.value))?;
        }
        if self.children.is_empty() && self.text.is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        f.write_str(&escape_text(&self.text))?;
        for child in &self.children {
            child.write_xml(f, &[])?;
        }
        write!(f, "</{qname}>")
    }
}

/// Iterator returned by [`XmlElement::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// Anything a feed or entry can be built from: raw XML text or an element
/// that was already parsed as part of a larger document.
pub trait IntoElement {
    fn into_element(self) -> AtomResult<XmlElement>;
}

impl IntoElement for XmlElement {
    fn into_element(self) -> AtomResult<XmlElement> {
        Ok(self)
    }
}

impl IntoElement for &XmlElement {
    fn into_element(self) -> AtomResult<XmlElement> {
        Ok(self.clone())
    }
}

impl IntoElement for &str {
    fn into_element(self) -> AtomResult<XmlElement> {
        XmlElement::parse(self)
    }
}

impl IntoElement for String {
    fn into_element(self) -> AtomResult<XmlElement> {
        XmlElement::parse(&self)
    }
}

impl IntoElement for &String {
    fn into_element(self) -> AtomResult<XmlElement> {
        XmlElement::parse(self)
    }
}

// ============================================================================
// Parser internals
// ============================================================================

/// Stack of in-scope prefix bindings; `None` is the default namespace.
#[derive(Default)]
struct NamespaceScope {
    bindings: Vec<(Option<String>, String)>,
}

impl NamespaceScope {
    fn push(&mut self, prefix: Option<String>, uri: String) {
        self.bindings.push((prefix, uri));
    }

    fn pop(&mut self, count: usize) {
        let keep = self.bindings.len().saturating_sub(count);
        self.bindings.truncate(keep);
    }

    fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        if prefix == Some("xml") {
            return Some(ns::XML);
        }
        self.bindings
            .iter()
            .rev()
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, uri)| uri.as_str())
            // xmlns="" undeclares the default namespace
            .filter(|uri| !uri.is_empty())
    }
}

fn utf8<'a>(bytes: &'a [u8], what: &str) -> AtomResult<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| AtomError::malformed(format!("invalid UTF-8 in {what}: {e}")))
}

/// Build an element from a start tag, registering its namespace declarations.
fn open_element(start: &BytesStart<'_>, scope: &mut NamespaceScope) -> AtomResult<(XmlElement, usize)> {
    let mut attributes = Vec::new();
    let mut declared = 0;

    for attr in start.attributes() {
        let attr = attr.map_err(|e| AtomError::malformed(format!("invalid attribute: {e}")))?;
        let name = utf8(attr.key.as_ref(), "attribute name")?.to_string();
        let value = attr.unescape_value()?.into_owned();

        if name == "xmlns" {
            scope.push(None, value.clone());
            declared += 1;
        } else if let Some(prefix) = name.strip_prefix("xmlns:") {
            scope.push(Some(prefix.to_string()), value.clone());
            declared += 1;
        }
        attributes.push(XmlAttribute { name, value });
    }

    let qname = start.name();
    let qname = utf8(qname.as_ref(), "element name")?;
    let (prefix, name) = match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    };

    let namespace = match prefix {
        Some(p) => Some(
            scope
                .resolve(Some(p))
                .ok_or_else(|| AtomError::malformed(format!("unbound prefix \"{p}\" on <{qname}>")))?
                .to_string(),
        ),
        None => scope.resolve(None).map(str::to_string),
    };

    let element = XmlElement {
        prefix: prefix.map(str::to_string),
        name: name.to_string(),
        namespace,
        attributes,
        children: Vec::new(),
        text: String::new(),
    };
    Ok((element, declared))
}

/// Attach a completed element to its parent, or make it the root.
fn attach(
    element: XmlElement,
    stack: &mut [(XmlElement, usize)],
    root: &mut Option<XmlElement>,
) -> AtomResult<()> {
    match stack.last_mut() {
        Some((parent, _)) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(AtomError::malformed(format!(
                "second root element <{}>",
                element.qualified_name()
            )))
        }
    }
    Ok(())
}

fn push_text(stack: &mut [(XmlElement, usize)], text: &str) -> AtomResult<()> {
    match stack.last_mut() {
        Some((open, _)) => open.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(AtomError::malformed("text outside the root element")),
    }
    Ok(())
}
