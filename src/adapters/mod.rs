//! Document adapters
//!
//! A document adapter bridges one medium (plain text, spreadsheet cell grid,
//! word-processing paragraphs, slide shapes, PDF page geometry, OCR word
//! boxes) to the detection and redaction core. Each adapter exposes the
//! medium's PII-bearing content as a sequence of addressable [`TextUnit`]s
//! and a rewrite (or geometry-redact) operation back onto the medium's
//! native structure.
//!
//! Orchestration is written once against [`DocumentAdapter`], never against
//! concrete medium types.

pub mod pdf;
pub mod raster;
pub mod slides;
pub mod spreadsheet;
pub mod text;
pub mod word;

use crate::detection::models::Span;
use crate::domain::Result;
use crate::redaction::{RedactionAction, RedactionPlan};
use std::path::Path;

// Re-export main types
pub use pdf::{BoxFill, PageRect, PdfAdapter, PdfDocumentHandle, PdfTextEngine};
pub use raster::{OcrEngine, RasterAdapter, TesseractCli, WordBox};
pub use slides::{MemoryDeck, ShapeInfo, ShapeKind, SlideAdapter, SlideDeck};
pub use spreadsheet::SpreadsheetAdapter;
pub use text::PlainTextAdapter;
pub use word::WordAdapter;

/// One addressable chunk of content owned by an adapter
///
/// A paragraph, a cell, a shape's text, a page's extracted text, or a single
/// OCR word. The location descriptor is for audit notes only and never feeds
/// detection logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    /// Position in the adapter's enumeration order; the adapter maps it back
    /// to the native address on apply
    pub index: usize,
    /// The unit's text content
    pub text: String,
    /// Human-readable location ("paragraph 3", "sheet Sales!B12", "page 1")
    pub location: String,
}

/// How one resolved span landed on the medium
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanOutcome {
    /// The unit's text was rewritten in place
    Rewritten,
    /// Geometry redaction: filled rectangles drawn over the occurrence
    Boxed { rects: usize },
    /// Detected, but the text-search capability found no on-page geometry;
    /// recorded as a gap, never silently dropped
    GeometryMiss,
}

/// Per-span application record returned by [`DocumentAdapter::apply`]
#[derive(Debug, Clone)]
pub struct SpanApplication {
    pub span: Span,
    pub outcome: SpanOutcome,
}

/// Capability set implemented by every medium
///
/// Unit enumeration is a lazy, finite, single-pass sequence: adapters do not
/// support restart mid-document, and a new instance must be constructed to
/// reprocess a file. Nothing is written to disk before `commit`; a failed
/// commit leaves no partial output to retain.
pub trait DocumentAdapter {
    /// Pull the next text unit, or `None` when the document is exhausted
    fn next_unit(&mut self) -> Option<TextUnit>;

    /// Apply a resolved plan to the unit's native structure
    ///
    /// Returns one [`SpanApplication`] per span in the plan, in plan order.
    fn apply(
        &mut self,
        unit: &TextUnit,
        plan: &RedactionPlan,
        action: RedactionAction,
    ) -> Result<Vec<SpanApplication>>;

    /// Remove embedded picture shapes (slide media only)
    ///
    /// A binary, non-span-based redaction driven by a caller policy flag,
    /// independent of text detection. Returns one location note per removed
    /// picture. Media without embedded pictures return an empty list.
    fn remove_embedded_pictures(&mut self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Serialize the redacted medium to `output`
    fn commit(&mut self, output: &Path) -> Result<()>;
}
