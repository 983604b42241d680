//! Plain-text adapter
//!
//! The whole file is one text unit; span offsets are direct indices into the
//! buffered content.

use crate::adapters::{DocumentAdapter, SpanApplication, SpanOutcome, TextUnit};
use crate::domain::{Result, ScourError};
use crate::redaction::{redact, RedactionAction, RedactionPlan};
use std::path::{Path, PathBuf};

/// Adapter for txt/csv/log/json files treated as flat text
#[derive(Debug)]
pub struct PlainTextAdapter {
    path: PathBuf,
    content: String,
    emitted: bool,
}

impl PlainTextAdapter {
    /// Buffer the file's content
    ///
    /// Invalid UTF-8 sequences are replaced rather than failing the load;
    /// log exports routinely carry stray bytes.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).map_err(|e| ScourError::load(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
            emitted: false,
        })
    }

    /// Current buffered content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl DocumentAdapter for PlainTextAdapter {
    fn next_unit(&mut self) -> Option<TextUnit> {
        if self.emitted {
            return None;
        }
        self.emitted = true;
        Some(TextUnit {
            index: 0,
            text: self.content.clone(),
            location: self.path.display().to_string(),
        })
    }

    fn apply(
        &mut self,
        unit: &TextUnit,
        plan: &RedactionPlan,
        action: RedactionAction,
    ) -> Result<Vec<SpanApplication>> {
        self.content = redact(&unit.text, plan, action);
        Ok(plan
            .iter()
            .map(|span| SpanApplication {
                span: span.clone(),
                outcome: SpanOutcome::Rewritten,
            })
            .collect())
    }

    fn commit(&mut self, output: &Path) -> Result<()> {
        std::fs::write(output, &self.content).map_err(|e| ScourError::save(output, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::DetectionEngine;
    use crate::redaction::resolve;
    use tempfile::tempdir;

    #[test]
    fn test_single_unit_single_pass() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("note.txt");
        std::fs::write(&input, "hello").unwrap();

        let mut adapter = PlainTextAdapter::load(&input).unwrap();
        assert!(adapter.next_unit().is_some());
        assert!(adapter.next_unit().is_none());
    }

    #[test]
    fn test_mask_and_commit() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("note.txt");
        let output = dir.path().join("note.clean.txt");
        std::fs::write(&input, "Contact Dr. Jane Smith at jane.smith@example.com").unwrap();

        let engine = DetectionEngine::new().unwrap();
        let mut adapter = PlainTextAdapter::load(&input).unwrap();
        let unit = adapter.next_unit().unwrap();
        let plan = resolve(engine.detect(&unit.text, false));
        let applications = adapter
            .apply(&unit, &plan, RedactionAction::Mask)
            .unwrap();

        assert_eq!(applications.len(), plan.len());
        adapter.commit(&output).unwrap();

        let cleaned = std::fs::read_to_string(&output).unwrap();
        assert_eq!(cleaned, "Contact [REDACTED] at [REDACTED]");
    }

    #[test]
    fn test_load_missing_file_is_load_failure() {
        let err = PlainTextAdapter::load(Path::new("/nonexistent/nope.txt")).unwrap_err();
        assert!(matches!(err, ScourError::LoadFailure { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw.log");
        std::fs::write(&input, [0x68, 0x69, 0xFF, 0x21]).unwrap();

        let adapter = PlainTextAdapter::load(&input).unwrap();
        assert!(adapter.content().starts_with("hi"));
    }
}
