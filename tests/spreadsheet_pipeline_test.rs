//! Spreadsheet pipeline integration tests
//!
//! Workbooks are built with the same writer the adapter commits through,
//! then re-read with the reader it loads through, so the round trip covers
//! both directions.

use calamine::{open_workbook_auto, Data, Reader};
use scour::adapters::SpreadsheetAdapter;
use scour::audit::AuditSink;
use scour::core::{process_document, RedactionOptions};
use scour::detection::DetectionEngine;
use std::path::Path;
use tempfile::tempdir;

fn write_fixture(path: &Path) {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sales").unwrap();
    sheet.write_string(0, 0, "Region").unwrap();
    sheet.write_number(0, 1, 42.0).unwrap();
    // B12
    sheet.write_string(11, 1, "SSN: 123-45-6789").unwrap();
    workbook.save(path).unwrap();
}

#[test]
fn test_cell_redaction_and_audit_location() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sales.xlsx");
    let output = dir.path().join("sales.clean.xlsx");
    write_fixture(&input);

    let engine = DetectionEngine::new().unwrap();
    let audit = AuditSink::new();
    let mut adapter = SpreadsheetAdapter::load(&input).unwrap();

    let report = process_document(
        &mut adapter,
        &engine,
        &RedactionOptions::default(),
        &audit,
        "sales.xlsx",
        "sales.clean.xlsx",
        &output,
    )
    .unwrap();

    assert_eq!(report.spans_redacted, 1);
    let events = audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].pii_type, "SSN");
    assert_eq!(events[0].snippet, "123-45-6789");
    assert!(events[0].location_note.contains("Sales"));
    assert!(events[0].location_note.contains("B12"));

    // Re-read the committed workbook.
    let mut reread = open_workbook_auto(&output).unwrap();
    let sheets = reread.worksheets();
    let (name, range) = &sheets[0];
    assert_eq!(name, "Sales");

    let redacted = range.get((11, 1)).cloned();
    assert_eq!(
        redacted,
        Some(Data::String("SSN: [REDACTED]".to_string()))
    );
    // Non-string cells are preserved untouched.
    assert_eq!(range.get((0, 1)).cloned(), Some(Data::Float(42.0)));
}

#[test]
fn test_non_string_cells_never_reach_detection() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("numbers.xlsx");
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    // Digits that would trip the phone pattern if scanned as text.
    sheet.write_number(0, 0, 9876543210.0).unwrap();
    sheet.write_boolean(1, 0, true).unwrap();
    workbook.save(&input).unwrap();

    let mut adapter = SpreadsheetAdapter::load(&input).unwrap();
    let engine = DetectionEngine::new().unwrap();
    let audit = AuditSink::new();

    let report = process_document(
        &mut adapter,
        &engine,
        &RedactionOptions::default(),
        &audit,
        "numbers.xlsx",
        "out.xlsx",
        &dir.path().join("out.xlsx"),
    )
    .unwrap();

    assert_eq!(report.units_scanned, 0);
    assert!(audit.is_empty());
}
