//! Redaction pipeline
//!
//! Drives one document through detection, span resolution and the adapter's
//! apply step, unit by unit, then commits the medium and hands the file's
//! audit events to the shared sink.

use crate::adapters::{DocumentAdapter, SpanOutcome};
use crate::audit::{AuditEvent, AuditSink};
use crate::detection::{DetectionEngine, PiiType};
use crate::redaction::{resolve, RedactionAction};
use crate::domain::Result;
use std::path::Path;

/// Caller policy switches
#[derive(Debug, Clone, Copy)]
pub struct RedactionOptions {
    pub action: RedactionAction,
    pub use_entity_recognizer: bool,
    pub remove_embedded_images: bool,
}

impl Default for RedactionOptions {
    fn default() -> Self {
        Self {
            action: RedactionAction::Mask,
            use_entity_recognizer: false,
            remove_embedded_images: false,
        }
    }
}

/// Per-file processing summary
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReport {
    pub units_scanned: usize,
    pub spans_redacted: usize,
    pub geometry_misses: usize,
    pub pictures_removed: usize,
}

/// Process one document end to end
///
/// Runs every text unit through detect → resolve → apply, optionally removes
/// embedded pictures, then commits to `output`. The file's audit events are
/// buffered locally and appended to the sink only after a successful commit:
/// a failed file retains no output and contributes no trail rows, and
/// within-file event order always reflects span resolution order.
pub fn process_document(
    adapter: &mut dyn DocumentAdapter,
    engine: &DetectionEngine,
    options: &RedactionOptions,
    audit: &AuditSink,
    input_ref: &str,
    output_ref: &str,
    output: &Path,
) -> Result<FileReport> {
    let mut report = FileReport::default();
    let mut events: Vec<AuditEvent> = Vec::new();

    while let Some(unit) = adapter.next_unit() {
        report.units_scanned += 1;

        let candidates = engine.detect(&unit.text, options.use_entity_recognizer);
        let plan = resolve(candidates);
        if plan.is_empty() {
            continue;
        }

        let applications = adapter.apply(&unit, &plan, options.action)?;
        for application in applications {
            let note = match application.outcome {
                SpanOutcome::GeometryMiss => {
                    report.geometry_misses += 1;
                    format!("{} (geometry not found)", unit.location)
                }
                SpanOutcome::Rewritten | SpanOutcome::Boxed { .. } => {
                    report.spans_redacted += 1;
                    unit.location.clone()
                }
            };
            events.push(AuditEvent::new(
                input_ref,
                output_ref,
                application.span.source.label(),
                application.span.pii_type.label(),
                &application.span.matched_text,
                options.action.as_str(),
                note,
            ));
        }
    }

    if options.remove_embedded_images {
        for location in adapter.remove_embedded_pictures()? {
            report.pictures_removed += 1;
            events.push(AuditEvent::new(
                input_ref,
                output_ref,
                "image_removal",
                PiiType::Image.label(),
                "image_removed",
                RedactionAction::Remove.as_str(),
                location,
            ));
        }
    }

    if let Err(error) = adapter.commit(output) {
        // No partial output for a failed file.
        let _ = std::fs::remove_file(output);
        return Err(error);
    }

    for event in events {
        audit.append(event);
    }

    Ok(report)
}
