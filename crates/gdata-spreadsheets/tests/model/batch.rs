//! Batch requests against a cell feed.

use gdata_spreadsheets::atom::{link_href, ns};
use gdata_spreadsheets::{BatchRequest, BatchResponse, CellFeed, Method, SpreadsheetError};
use pretty_assertions::assert_eq;

use crate::common::*;

#[test]
fn request_xml_has_one_entry_per_cell_in_order() {
    let mock = MockTransport::new();
    let feed = CellFeed::new(shared(&mock), fixture("cell-feed.xml")).unwrap();

    let mut first = feed.cell(1, 1).unwrap().unwrap().clone();
    first.set_content("Full Name");
    let second = feed.create_insertion_cell(5, 3, r#"x & "y" < z"#).unwrap();

    let mut batch = BatchRequest::new();
    batch.add_entry(first.clone());
    batch.add_entry(second.clone());
    assert_eq!(batch.len(), 2);

    let xml = gdata_spreadsheets::XmlElement::parse(&batch.create_request_xml(&feed).unwrap()).unwrap();
    assert!(xml.is(ns::ATOM, "feed"));
    assert_eq!(xml.child_text(ns::ATOM, "id"), Some(CELL_FEED_URL));

    let entries: Vec<_> = xml.children_named(ns::ATOM, "entry").collect();
    assert_eq!(entries.len(), 2);

    for (i, (entry, cell)) in entries.iter().zip([&first, &second]).enumerate() {
        let batch_id = format!("A{}", i + 1);
        assert_eq!(entry.child_text(ns::BATCH, "id"), Some(batch_id.as_str()));
        assert_eq!(
            entry.required_child(ns::BATCH, "operation").unwrap().attribute("type"),
            Some("update")
        );
        assert_eq!(
            entry.child_text(ns::ATOM, "id"),
            Some(format!("{CELL_FEED_URL}/{}", cell.cell_id()).as_str())
        );
        assert_eq!(link_href(entry, "edit").unwrap(), cell.edit_url().unwrap());

        let gs_cell = entry.required_child(ns::SPREADSHEETS, "cell").unwrap();
        assert_eq!(gs_cell.attribute("row"), Some(cell.row().to_string().as_str()));
        assert_eq!(gs_cell.attribute("col"), Some(cell.column().to_string().as_str()));
        assert_eq!(gs_cell.attribute("inputValue"), Some(cell.content()));
    }
}

#[test]
fn empty_batch_is_rejected() {
    let mock = MockTransport::new();
    let feed = CellFeed::new(shared(&mock), fixture("cell-feed.xml")).unwrap();
    let batch = BatchRequest::new();

    assert!(batch.is_empty());
    assert!(matches!(batch.create_request_xml(&feed), Err(SpreadsheetError::EmptyBatch)));
    assert!(matches!(feed.update_batch(&batch), Err(SpreadsheetError::EmptyBatch)));
    assert!(mock.requests().is_empty());
}

#[test]
fn update_batch_posts_to_batch_link() {
    let mock = MockTransport::new();
    let feed = CellFeed::new(shared(&mock), fixture("cell-feed.xml")).unwrap();
    mock.respond_fixture("batch-response.xml");

    let mut batch = BatchRequest::new();
    batch.add_entry(feed.create_insertion_cell(5, 3, "42").unwrap());
    batch.add_entry(feed.create_insertion_cell(5, 4, "ok").unwrap());
    let response = feed.insert_batch(&batch).unwrap();

    assert!(!response.has_errors());
    let request = mock.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, format!("{CELL_FEED_URL}/batch"));
    assert_eq!(request.xml().children_named(ns::ATOM, "entry").count(), 2);
}

#[test]
fn response_without_errors() {
    let response = BatchResponse::new(fixture("batch-response.xml")).unwrap();
    assert!(!response.has_errors());
}

#[test]
fn response_with_one_failed_entry_has_errors() {
    let response = BatchResponse::new(fixture("batch-response-error.xml")).unwrap();
    assert!(response.has_errors());

    let failed: Vec<_> = response
        .xml()
        .descendants()
        .filter(|el| el.is(ns::BATCH, "status"))
        .filter_map(|el| el.attribute("code"))
        .filter(|code| *code != "200")
        .collect();
    assert_eq!(failed, vec!["400"]);
}

#[test]
fn status_codes_are_found_at_any_depth() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:b="http://schemas.google.com/gdata/batch">
        <entry><b:status code="200"/></entry>
        <entry><wrapper><b:status code="409"/></wrapper></entry>
    </feed>"#;
    assert!(BatchResponse::new(xml).unwrap().has_errors());

    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:b="http://schemas.google.com/gdata/batch">
        <entry><b:status code="200"/></entry>
        <entry><status code="500"/></entry>
    </feed>"#;
    assert!(!BatchResponse::new(xml).unwrap().has_errors());
}
