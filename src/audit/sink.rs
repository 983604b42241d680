//! Audit sink
//!
//! Collects one structured event per applied redaction and persists the
//! trail at end-of-run as CSV, a human-readable grid table, and a
//! spreadsheet. The sink is an explicit handle passed to every call that can
//! produce an event; there is no process-wide logger.

use crate::domain::{Result, ScourError};
use chrono::{DateTime, Utc};
use comfy_table::Table;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Maximum snippet length carried in an audit row
const SNIPPET_MAX_CHARS: usize = 200;

/// One applied redaction
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    /// Event creation time
    pub timestamp: DateTime<Utc>,
    /// Source document
    pub input_ref: String,
    /// Redacted document
    pub output_ref: String,
    /// Detector attribution ("pattern", "ner", "image_removal")
    pub detector: String,
    /// PII category label
    pub pii_type: String,
    /// Matched text, newline-collapsed and truncated to 200 characters
    pub snippet: String,
    /// SHA-256 digest of the full matched text
    pub value_hash: String,
    /// Action taken ("mask" or "remove")
    pub action: String,
    /// Medium-specific location ("sheet Sales!B12", "page 1", ...)
    pub location_note: String,
}

impl AuditEvent {
    /// Build an event, normalizing the snippet
    pub fn new(
        input_ref: impl Into<String>,
        output_ref: impl Into<String>,
        detector: impl Into<String>,
        pii_type: impl Into<String>,
        matched_text: &str,
        action: impl Into<String>,
        location_note: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            input_ref: input_ref.into(),
            output_ref: output_ref.into(),
            detector: detector.into(),
            pii_type: pii_type.into(),
            snippet: collapse_snippet(matched_text),
            value_hash: hash_value(matched_text),
            action: action.into(),
            location_note: location_note.into(),
        }
    }
}

fn collapse_snippet(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
        .chars()
        .take(SNIPPET_MAX_CHARS)
        .collect()
}

fn hash_value(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Persisted audit artifact paths
#[derive(Debug, Clone)]
pub struct AuditArtifacts {
    pub csv: PathBuf,
    pub table: PathBuf,
    pub spreadsheet: PathBuf,
}

const HEADERS: [&str; 9] = [
    "timestamp",
    "input_file",
    "output_file",
    "detector",
    "detection_type",
    "original_snippet",
    "value_hash",
    "action",
    "notes",
];

/// Append-only audit trail shared across file workers
///
/// `append` serializes concurrent calls behind a mutex and never fails
/// observably. Ordering across files is loose; within one file the events
/// reflect span resolution order because each file is processed by a single
/// worker.
#[derive(Debug, Default)]
pub struct AuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl AuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one event
    pub fn append(&self, event: AuditEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persist the trail into `dir` as audit_log.{csv,txt,xlsx}
    pub fn flush(&self, dir: &Path) -> Result<AuditArtifacts> {
        std::fs::create_dir_all(dir)?;
        let events = self.events();

        let artifacts = AuditArtifacts {
            csv: dir.join("audit_log.csv"),
            table: dir.join("audit_log.txt"),
            spreadsheet: dir.join("audit_log.xlsx"),
        };

        self.write_csv(&artifacts.csv, &events)?;
        self.write_table(&artifacts.table, &events)?;
        self.write_spreadsheet(&artifacts.spreadsheet, &events)?;

        Ok(artifacts)
    }

    fn write_csv(&self, path: &Path, events: &[AuditEvent]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| ScourError::Audit(format!("failed to open {}: {e}", path.display())))?;

        writer
            .write_record(HEADERS)
            .map_err(|e| ScourError::Audit(e.to_string()))?;
        for event in events {
            writer
                .write_record(event_record(event))
                .map_err(|e| ScourError::Audit(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| ScourError::Audit(e.to_string()))?;
        Ok(())
    }

    fn write_table(&self, path: &Path, events: &[AuditEvent]) -> Result<()> {
        let mut table = Table::new();
        table.set_header(HEADERS.to_vec());
        for event in events {
            table.add_row(event_record(event));
        }
        std::fs::write(path, format!("{table}\n"))?;
        Ok(())
    }

    fn write_spreadsheet(&self, path: &Path, events: &[AuditEvent]) -> Result<()> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *header)
                .map_err(|e| ScourError::Audit(e.to_string()))?;
        }
        for (row, event) in events.iter().enumerate() {
            for (col, value) in event_record(event).into_iter().enumerate() {
                worksheet
                    .write_string(row as u32 + 1, col as u16, value)
                    .map_err(|e| ScourError::Audit(e.to_string()))?;
            }
        }

        workbook
            .save(path)
            .map_err(|e| ScourError::Audit(format!("failed to save {}: {e}", path.display())))?;
        Ok(())
    }
}

fn event_record(event: &AuditEvent) -> Vec<String> {
    vec![
        event.timestamp.to_rfc3339(),
        event.input_ref.clone(),
        event.output_ref.clone(),
        event.detector.clone(),
        event.pii_type.clone(),
        event.snippet.clone(),
        event.value_hash.clone(),
        event.action.clone(),
        event.location_note.clone(),
    ]
}
