//! Integration tests for the spreadsheet object model.
//!
//! Every test runs against canned GData documents from `tests/fixtures/`
//! served by a [`common::MockTransport`], which also records each request
//! so the XML bodies the model sends can be asserted on.

mod batch;
mod common;
mod worksheets;

pub use common::*;
