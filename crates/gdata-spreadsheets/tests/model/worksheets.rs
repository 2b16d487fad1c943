//! Worksheets and worksheet feeds.

use gdata_spreadsheets::atom::ns;
use gdata_spreadsheets::{Method, SpreadsheetError, Worksheet, WorksheetFeed};
use pretty_assertions::assert_eq;

use crate::common::*;

const WORKSHEET_ID: &str =
    "https://spreadsheets.google.com/feeds/worksheets/tA3TdJ0RIVEem3xQZhG2Ceg/private/full/od8";

fn worksheet(mock: &std::sync::Arc<MockTransport>) -> Worksheet {
    Worksheet::new(shared(mock), fixture("worksheet.xml")).unwrap()
}

#[test]
fn worksheet_accessors() {
    let mock = MockTransport::new();
    let ws = worksheet(&mock);

    assert_eq!(ws.id(), WORKSHEET_ID);
    assert_eq!(ws.worksheet_id(), "od8");
    assert_eq!(ws.title(), "Test");
    assert_eq!(ws.row_count().unwrap(), 100);
    assert_eq!(ws.col_count().unwrap(), 10);
    assert_eq!(ws.updated().unwrap().to_rfc3339(), "2013-02-10T21:12:33.613+00:00");
    assert_eq!(ws.edit_url().unwrap(), WORKSHEET_EDIT_URL);
    assert_eq!(
        ws.list_feed_url().unwrap(),
        "https://spreadsheets.google.com/feeds/list/tA3TdJ0RIVEem3xQZhG2Ceg/od8/private/full"
    );
    assert_eq!(
        ws.cell_feed_url().unwrap(),
        "https://spreadsheets.google.com/feeds/cells/tA3TdJ0RIVEem3xQZhG2Ceg/od8/private/full"
    );
    assert_eq!(
        ws.export_csv_url().unwrap(),
        "https://docs.google.com/spreadsheets/d/15LRDjnN-VvhG2tYOoVLfCH40D6JoW5NfFiqSTc5U/export?gid=0&format=csv"
    );
    assert_eq!(ws.gid().unwrap(), "0");
}

#[test]
fn update_title_keeps_current_size() {
    let mock = MockTransport::new();
    let mut ws = worksheet(&mock);
    mock.respond_fixture("worksheet-updated.xml");

    ws.update(Some("Renamed"), None, None).unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url, WORKSHEET_EDIT_URL);
    assert!(request.body.contains("<gs:colCount>10</gs:colCount>"));
    assert!(request.body.contains("<gs:rowCount>100</gs:rowCount>"));

    let body = request.xml();
    assert_eq!(body.child_text(ns::ATOM, "id"), Some(WORKSHEET_ID));
    assert_eq!(body.child_text(ns::ATOM, "title"), Some("Renamed"));

    assert_eq!(ws.title(), "Renamed");
    assert!(ws.edit_url().unwrap().ends_with("/od8/1"));
}

#[test]
fn update_size_keeps_current_title() {
    let mock = MockTransport::new();
    let mut ws = worksheet(&mock);

    ws.update(None, Some(26), Some(1000)).unwrap();

    let body = mock.last_request().xml();
    assert_eq!(body.child_text(ns::ATOM, "title"), Some("Test"));
    assert_eq!(body.child_text(ns::SPREADSHEETS, "colCount"), Some("26"));
    assert_eq!(body.child_text(ns::SPREADSHEETS, "rowCount"), Some("1000"));
    // Empty response: the view is kept as it was.
    assert_eq!(ws.row_count().unwrap(), 100);
}

#[test]
fn delete_issues_delete_on_edit_url() {
    let mock = MockTransport::new();
    worksheet(&mock).delete().unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.url, WORKSHEET_EDIT_URL);
}

#[test]
fn list_feed_query_is_form_encoded() {
    let mock = MockTransport::new();
    let ws = worksheet(&mock);
    mock.respond_fixture("list-feed.xml");

    let feed = ws.list_feed(&[("reverse", "true"), ("sq", "age > 45")]).unwrap();
    assert_eq!(feed.entries().len(), 4);
    assert_eq!(
        mock.last_request().url,
        "https://spreadsheets.google.com/feeds/list/tA3TdJ0RIVEem3xQZhG2Ceg/od8/private/full?reverse=true&sq=age+%3E+45"
    );
}

#[test]
fn cell_feed_is_fetched_from_link() {
    let mock = MockTransport::new();
    let ws = worksheet(&mock);
    mock.respond_fixture("cell-feed.xml");

    let feed = ws.cell_feed(&[]).unwrap();
    assert_eq!(feed.entries().unwrap().len(), 6);
    assert_eq!(mock.last_request().method, Method::Get);
    assert_eq!(mock.last_request().url, ws.cell_feed_url().unwrap());
}

#[test]
fn csv_export() {
    let mock = MockTransport::new();
    let ws = worksheet(&mock);
    mock.respond("Name,Age\nAsim,99\n\"Smith, J\",18\n");

    let rows = ws.csv_rows().unwrap();
    assert_eq!(
        rows,
        vec![
            vec!["Name".to_string(), "Age".to_string()],
            vec!["Asim".to_string(), "99".to_string()],
            vec!["Smith, J".to_string(), "18".to_string()],
        ]
    );
    assert_eq!(mock.last_request().url, ws.export_csv_url().unwrap());
}

#[test]
fn create_header_writes_row_one() {
    let mock = MockTransport::new();
    let ws = worksheet(&mock);
    mock.respond_fixture("cell-feed.xml");

    ws.create_header(["Name", "Age", "Email"]).unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0].method, Method::Get);
    for (col, request) in (1..).zip(&requests[1..]) {
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, CELL_FEED_URL);
        let body = request.xml();
        let cell = body.required_child(ns::SPREADSHEETS, "cell").unwrap();
        assert_eq!(cell.attribute("row"), Some("1"));
        assert_eq!(cell.attribute("col"), Some(col.to_string().as_str()));
    }
}

#[test]
fn missing_link_is_a_url_error() {
    let mock = MockTransport::new();
    let ws = Worksheet::new(
        shared(&mock),
        r#"<entry xmlns="http://www.w3.org/2005/Atom"><id>https://x/worksheets/k/private/full/od6</id></entry>"#,
    )
    .unwrap();

    match ws.edit_url() {
        Err(SpreadsheetError::Url { rel, .. }) => assert_eq!(rel, "edit"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(ws.row_count(), Err(SpreadsheetError::Parse { .. })));
    assert!(matches!(ws.delete(), Err(SpreadsheetError::Url { .. })));
    assert!(mock.requests().is_empty());
}

#[test]
fn feed_lookup_by_title_and_id() {
    let mock = MockTransport::new();
    let feed = WorksheetFeed::new(shared(&mock), fixture("worksheet-feed.xml")).unwrap();

    assert_eq!(feed.entries().len(), 2);
    assert_eq!(feed.title(), "Test Spreadsheet");
    assert_eq!(
        feed.post_url().unwrap(),
        "https://spreadsheets.google.com/feeds/worksheets/tA3TdJ0RIVEem3xQZhG2Ceg/private/full"
    );

    let sheet2 = feed.by_title("Sheet2").unwrap();
    assert_eq!(sheet2.worksheet_id(), "oxqcu8b");
    assert_eq!(sheet2.gid().unwrap(), "1846379201");
    assert_eq!((sheet2.row_count().unwrap(), sheet2.col_count().unwrap()), (50, 4));

    assert_eq!(feed.by_id("od6").unwrap().title(), "Sheet1");
    assert_eq!(feed.by_id(sheet2.id()).unwrap().title(), "Sheet2");

    assert!(feed.find_by_title("Sheet3").is_none());
    assert!(feed.find_by_id("od7").is_none());
    assert!(matches!(
        feed.by_title("Sheet3"),
        Err(SpreadsheetError::WorksheetNotFound(title)) if title == "Sheet3"
    ));
    assert!(feed.by_id("od7").unwrap_err().is_not_found());
    assert!(matches!(feed.cell_feed_url(), Err(SpreadsheetError::Url { .. })));
}

#[test]
fn timestamp_is_checked_when_built() {
    let mock = MockTransport::new();
    let bad = r#"<entry xmlns="http://www.w3.org/2005/Atom"><id>x/od6</id><updated>yesterday</updated></entry>"#;
    assert!(matches!(
        Worksheet::new(shared(&mock), bad),
        Err(SpreadsheetError::InvalidTimestamp { value, .. }) if value == "yesterday"
    ));

    let feed = format!(
        r#"<feed xmlns="http://www.w3.org/2005/Atom"><id>f</id><updated>2013-02-10T21:12:33.613Z</updated>{}</feed>"#,
        bad.replace(r#" xmlns="http://www.w3.org/2005/Atom""#, "")
    );
    assert!(matches!(
        WorksheetFeed::new(shared(&mock), feed.as_str()),
        Err(SpreadsheetError::InvalidTimestamp { .. })
    ));

    let undated = r#"<entry xmlns="http://www.w3.org/2005/Atom"><id>x/od6</id></entry>"#;
    assert_eq!(Worksheet::new(shared(&mock), undated).unwrap().updated(), None);
}
