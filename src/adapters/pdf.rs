//! PDF adapter
//!
//! One text unit per page, extracted in reading order. Redaction is applied
//! as page geometry, not string replacement: each resolved span's matched
//! text is mapped back to on-page rectangles through the engine's text
//! search, and an opaque box is annotated over every hit (black for Mask,
//! white for Remove).
//!
//! Commit is a two-phase protocol: annotations are first recorded, then the
//! apply phase physically strips the covered text from the content stream.
//! Skipping the apply phase would leave the text recoverable from the file,
//! so commit fails loudly when the engine does not confirm every pending
//! annotation was applied.
//!
//! PDF parsing itself is consumed through the [`PdfTextEngine`] capability;
//! a fitz-class engine binds at this seam.

use crate::adapters::{DocumentAdapter, SpanApplication, SpanOutcome, TextUnit};
use crate::domain::{Result, ScourError};
use crate::redaction::{RedactionAction, RedactionPlan};
use std::path::Path;

/// Axis-aligned rectangle in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fill color of a redaction box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxFill {
    Black,
    White,
}

impl From<RedactionAction> for BoxFill {
    fn from(action: RedactionAction) -> Self {
        match action {
            RedactionAction::Mask => Self::Black,
            RedactionAction::Remove => Self::White,
        }
    }
}

/// Open document handle supplied by a [`PdfTextEngine`]
pub trait PdfDocumentHandle: Send {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Text of one page in reading order (zero-based)
    fn page_text(&mut self, page: usize) -> Result<String>;

    /// On-page rectangles where `needle` occurs
    fn search(&mut self, page: usize, needle: &str) -> Result<Vec<PageRect>>;

    /// Record a redaction annotation over `rect`
    fn annotate_redaction(&mut self, page: usize, rect: PageRect, fill: BoxFill) -> Result<()>;

    /// Physically strip the content under all recorded annotations
    ///
    /// Returns the number of annotations applied.
    fn apply_redactions(&mut self) -> Result<usize>;

    /// Serialize the document
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// PDF engine capability (load step of the two-phase protocol)
pub trait PdfTextEngine: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocumentHandle>>;
}

/// Adapter over any [`PdfTextEngine`]
pub struct PdfAdapter {
    handle: Box<dyn PdfDocumentHandle>,
    page_cursor: usize,
    pending_annotations: usize,
}

impl PdfAdapter {
    /// Open `path` through `engine`
    pub fn open(engine: &dyn PdfTextEngine, path: &Path) -> Result<Self> {
        Ok(Self {
            handle: engine.open(path)?,
            page_cursor: 0,
            pending_annotations: 0,
        })
    }
}

impl DocumentAdapter for PdfAdapter {
    fn next_unit(&mut self) -> Option<TextUnit> {
        while self.page_cursor < self.handle.page_count() {
            let page = self.page_cursor;
            self.page_cursor += 1;

            match self.handle.page_text(page) {
                Ok(text) => {
                    return Some(TextUnit {
                        index: page,
                        text,
                        location: format!("page {}", page + 1),
                    })
                }
                Err(error) => {
                    tracing::warn!(page = page + 1, %error, "Skipping unreadable page");
                }
            }
        }
        None
    }

    fn apply(
        &mut self,
        unit: &TextUnit,
        plan: &RedactionPlan,
        action: RedactionAction,
    ) -> Result<Vec<SpanApplication>> {
        let page = unit.index;
        let fill = BoxFill::from(action);
        let mut applications = Vec::with_capacity(plan.len());

        for span in plan {
            let rects = self.handle.search(page, &span.matched_text)?;
            if rects.is_empty() {
                // Font substitution and kerning artifacts can defeat the
                // text search; the span stays audited as a recorded gap.
                tracing::warn!(
                    page = page + 1,
                    pii_type = %span.pii_type,
                    "Detected text not found on page, geometry skipped"
                );
                applications.push(SpanApplication {
                    span: span.clone(),
                    outcome: SpanOutcome::GeometryMiss,
                });
                continue;
            }

            for rect in &rects {
                self.handle.annotate_redaction(page, *rect, fill)?;
                self.pending_annotations += 1;
            }
            applications.push(SpanApplication {
                span: span.clone(),
                outcome: SpanOutcome::Boxed { rects: rects.len() },
            });
        }

        Ok(applications)
    }

    fn commit(&mut self, output: &Path) -> Result<()> {
        // Phase two: the annotations recorded during apply must be
        // physically applied before serialization, otherwise the covered
        // text remains recoverable from the content stream.
        let applied = self.handle.apply_redactions()?;
        if applied != self.pending_annotations {
            return Err(ScourError::save(
                output,
                format!(
                    "redaction apply phase incomplete: {} of {} annotations applied",
                    applied, self.pending_annotations
                ),
            ));
        }
        self.handle.save(output)
    }
}
