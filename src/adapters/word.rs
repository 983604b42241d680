//! Word-processing adapter
//!
//! One text unit per paragraph; empty and whitespace-only paragraphs never
//! reach detection. Applying a plan replaces all formatted runs in the
//! paragraph with a single run carrying the redacted text: run-level
//! formatting granularity is intentionally collapsed, trading formatting for
//! the guarantee that no span straddles a run boundary unredacted.

use crate::adapters::{DocumentAdapter, SpanApplication, SpanOutcome, TextUnit};
use crate::domain::{Result, ScourError};
use crate::redaction::{redact, RedactionAction, RedactionPlan};
use docx_rs::{Docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild};
use std::path::Path;

/// Adapter for docx documents
pub struct WordAdapter {
    docx: Option<Docx>,
    cursor: usize,
    paragraph_number: usize,
}

impl WordAdapter {
    /// Parse a docx file into memory
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| ScourError::load(path, e))?;
        let docx =
            docx_rs::read_docx(&bytes).map_err(|e| ScourError::load(path, format!("{e:?}")))?;

        Ok(Self {
            docx: Some(docx),
            cursor: 0,
            paragraph_number: 0,
        })
    }

    fn docx_mut(&mut self) -> Result<&mut Docx> {
        self.docx
            .as_mut()
            .ok_or_else(|| ScourError::Other("document already committed".to_string()))
    }
}

/// Concatenated text of a paragraph's runs
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

impl DocumentAdapter for WordAdapter {
    fn next_unit(&mut self) -> Option<TextUnit> {
        let docx = self.docx.as_ref()?;
        while self.cursor < docx.document.children.len() {
            let index = self.cursor;
            self.cursor += 1;

            if let DocumentChild::Paragraph(paragraph) = &docx.document.children[index] {
                self.paragraph_number += 1;
                let text = paragraph_text(paragraph);
                if text.trim().is_empty() {
                    continue;
                }
                return Some(TextUnit {
                    index,
                    text,
                    location: format!("paragraph {}", self.paragraph_number),
                });
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
        let cleaned = redact(&unit.text, plan, action);
        let docx = self.docx_mut()?;

        match docx.document.children.get_mut(unit.index) {
            Some(DocumentChild::Paragraph(paragraph)) => {
                // All runs collapse into one carrying the redacted text.
                paragraph
                    .children
                    .retain(|child| !matches!(child, ParagraphChild::Run(_)));
                paragraph
                    .children
                    .push(ParagraphChild::Run(Box::new(Run::new().add_text(cleaned))));
            }
            _ => {
                return Err(ScourError::Other(format!(
                    "text unit {} no longer addresses a paragraph",
                    unit.index
                )))
            }
        }

        Ok(plan
            .iter()
            .map(|span| SpanApplication {
                span: span.clone(),
                outcome: SpanOutcome::Rewritten,
            })
            .collect())
    }

    fn commit(&mut self, output: &Path) -> Result<()> {
        let docx = self
            .docx
            .take()
            .ok_or_else(|| ScourError::save(output, "document already committed"))?;

        let file = std::fs::File::create(output).map_err(|e| ScourError::save(output, e))?;
        docx.build()
            .pack(file)
            .map_err(|e| ScourError::save(output, e))?;
        Ok(())
    }
}
