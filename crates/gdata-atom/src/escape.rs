//! Escaping helpers for hand-built GData request bodies.
//!
//! Request bodies are assembled with `format!` like any other XML part we
//! write, so every caller-supplied value must pass through one of these
//! before it lands in the document.

use std::borrow::Cow;

/// Escape a value for use inside a double- or single-quoted attribute.
///
/// Escapes `&`, `<`, `>`, `"` and `'`. Tabs and line breaks become character
/// references, since parsers normalize raw ones in attribute values to spaces.
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    let escaped = quick_xml::escape::escape(value);
    if !escaped.contains(['\n', '\r', '\t']) {
        return escaped;
    }
    Cow::Owned(
        escaped
            .replace('\n', "&#10;")
            .replace('\r', "&#13;")
            .replace('\t', "&#9;"),
    )
}

/// Escape a value for use as element text.
///
/// Escapes `&`, `<` and `>`; quotes are legal in text content.
pub fn escape_text(value: &str) -> Cow<'_, str> {
    quick_xml::escape::partial_escape(value)
}

/// Wrap a value in a CDATA section.
///
/// A literal `]]>` inside the value would terminate the section early, so it
/// is split across two sections (`]]` + `>`), which parsers concatenate back.
pub fn cdata(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 12);
    out.push_str("<![CDATA[");
    out.push_str(&value.replace("]]>", "]]]]><![CDATA[>"));
    out.push_str("]]>");
    out
}
