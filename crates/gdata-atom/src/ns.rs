//! Namespace URIs used by the GData spreadsheets dialect.

/// Atom syndication format (the default namespace of every feed and entry)
pub const ATOM: &str = "http://www.w3.org/2005/Atom";

/// GData core namespace (link relations such as `#post` and `#batch` live under it)
pub const GDATA: &str = "http://schemas.google.com/g/2005";

/// GData batch processing (`batch:id`, `batch:operation`, `batch:status`)
pub const BATCH: &str = "http://schemas.google.com/gdata/batch";

/// Spreadsheets namespace, conventionally bound to the `gs` prefix
pub const SPREADSHEETS: &str = "http://schemas.google.com/spreadsheets/2006";

/// Spreadsheets extended namespace for list-feed columns, bound to `gsx`
pub const EXTENDED: &str = "http://schemas.google.com/spreadsheets/2006/extended";

/// The implicitly bound `xml` prefix
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// Whether `uri` is one of the OpenSearch namespaces feeds use for paging
/// metadata (`totalResults`, `startIndex`).
///
/// GData has shipped several of them over time, all under `a9.com`.
pub fn is_open_search(uri: &str) -> bool {
    uri.starts_with("http://a9.com/-/") && uri.to_ascii_lowercase().contains("opensearch")
}
