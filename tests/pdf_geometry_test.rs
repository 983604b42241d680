//! PDF geometry redaction tests against a scripted page engine

use scour::adapters::{
    BoxFill, PageRect, PdfAdapter, PdfDocumentHandle, PdfTextEngine,
};
use scour::audit::AuditSink;
use scour::core::{process_document, RedactionOptions};
use scour::detection::DetectionEngine;
use scour::domain::{Result, ScourError};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct EngineLog {
    annotations: usize,
    applied: usize,
    saved: bool,
}

struct FakeDoc {
    pages: Vec<String>,
    searchable: bool,
    honest_apply: bool,
    log: Arc<Mutex<EngineLog>>,
}

impl PdfDocumentHandle for FakeDoc {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&mut self, page: usize) -> Result<String> {
        Ok(self.pages[page].clone())
    }

    fn search(&mut self, _page: usize, needle: &str) -> Result<Vec<PageRect>> {
        if !self.searchable {
            return Ok(Vec::new());
        }
        Ok(vec![PageRect {
            x: 72.0,
            y: 700.0,
            width: needle.len() as f32 * 6.0,
            height: 14.0,
        }])
    }

    fn annotate_redaction(&mut self, _page: usize, _rect: PageRect, _fill: BoxFill) -> Result<()> {
        self.log.lock().unwrap().annotations += 1;
        Ok(())
    }

    fn apply_redactions(&mut self) -> Result<usize> {
        let mut log = self.log.lock().unwrap();
        if self.honest_apply {
            log.applied = log.annotations;
        }
        Ok(log.applied)
    }

    fn save(&mut self, _path: &Path) -> Result<()> {
        self.log.lock().unwrap().saved = true;
        Ok(())
    }
}

struct FakeEngine {
    pages: Vec<String>,
    searchable: bool,
    honest_apply: bool,
    log: Arc<Mutex<EngineLog>>,
}

impl FakeEngine {
    fn new(pages: Vec<&str>, searchable: bool, honest_apply: bool) -> Self {
        Self {
            pages: pages.into_iter().map(String::from).collect(),
            searchable,
            honest_apply,
            log: Arc::default(),
        }
    }
}

impl PdfTextEngine for FakeEngine {
    fn open(&self, _path: &Path) -> Result<Box<dyn PdfDocumentHandle>> {
        Ok(Box::new(FakeDoc {
            pages: self.pages.clone(),
            searchable: self.searchable,
            honest_apply: self.honest_apply,
            log: Arc::clone(&self.log),
        }))
    }
}

#[test]
fn test_page_spans_boxed_and_audited() {
    let engine = FakeEngine::new(
        vec!["Page one has jane@example.com", "Page two has 192.168.1.1"],
        true,
        true,
    );
    let detector = DetectionEngine::new().unwrap();
    let audit = AuditSink::new();
    let mut adapter = PdfAdapter::open(&engine, Path::new("in.pdf")).unwrap();

    let report = process_document(
        &mut adapter,
        &detector,
        &RedactionOptions::default(),
        &audit,
        "in.pdf",
        "out.pdf",
        Path::new("out.pdf"),
    )
    .unwrap();

    assert_eq!(report.units_scanned, 2);
    assert_eq!(report.spans_redacted, 2);
    assert_eq!(report.geometry_misses, 0);

    let events = audit.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].location_note, "page 1");
    assert_eq!(events[1].location_note, "page 2");

    let log = engine.log.lock().unwrap();
    assert_eq!(log.annotations, 2);
    assert_eq!(log.applied, 2);
    assert!(log.saved);
}

#[test]
fn test_geometry_miss_is_audited_and_file_still_saves() {
    // Font substitution defeats the text search: zero rectangles found.
    let engine = FakeEngine::new(vec!["reach jane@example.com"], false, true);
    let detector = DetectionEngine::new().unwrap();
    let audit = AuditSink::new();
    let mut adapter = PdfAdapter::open(&engine, Path::new("in.pdf")).unwrap();

    let report = process_document(
        &mut adapter,
        &detector,
        &RedactionOptions::default(),
        &audit,
        "in.pdf",
        "out.pdf",
        Path::new("out.pdf"),
    )
    .unwrap();

    assert_eq!(report.geometry_misses, 1);
    assert_eq!(report.spans_redacted, 0);

    // The span is still audited as detected, flagged as a recorded gap.
    let events = audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, "mask");
    assert!(events[0].location_note.contains("geometry not found"));

    assert!(engine.log.lock().unwrap().saved);
}

#[test]
fn test_commit_refuses_unapplied_annotations() {
    // The engine records annotations but its apply phase is a no-op; the
    // covered text would remain recoverable, so commit must fail.
    let engine = FakeEngine::new(vec!["ssn 123-45-6789"], true, false);
    let detector = DetectionEngine::new().unwrap();
    let audit = AuditSink::new();
    let mut adapter = PdfAdapter::open(&engine, Path::new("in.pdf")).unwrap();

    let err = process_document(
        &mut adapter,
        &detector,
        &RedactionOptions::default(),
        &audit,
        "in.pdf",
        "out.pdf",
        Path::new("out.pdf"),
    )
    .unwrap_err();

    assert!(matches!(err, ScourError::SaveFailure { .. }));
    assert!(!engine.log.lock().unwrap().saved);
    // A failed file contributes no audit rows.
    assert!(audit.is_empty());
}
