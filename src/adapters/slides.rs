//! Slide adapter
//!
//! One text unit per shape with non-empty text. Shapes classified as
//! embedded pictures support outright removal, a binary redaction driven by
//! a caller policy flag: picture content cannot be scanned by the text core,
//! so the only safe redaction is deletion.
//!
//! The deck itself is consumed through the [`SlideDeck`] capability; the
//! shipped [`MemoryDeck`] is a serde-backed deck model (JSON load/save) used
//! in tests and embeddings. A presentation-format binding plugs in at the
//! same seam.

use crate::adapters::{DocumentAdapter, SpanApplication, SpanOutcome, TextUnit};
use crate::domain::{Result, ScourError};
use crate::redaction::{redact, RedactionAction, RedactionPlan};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Text,
    Picture,
}

/// Snapshot of one shape at enumeration time
#[derive(Debug, Clone)]
pub struct ShapeInfo {
    /// Zero-based slide position
    pub slide: usize,
    /// Zero-based shape position within the slide; stable across removals
    pub shape: usize,
    pub kind: ShapeKind,
    /// Present for text shapes
    pub text: Option<String>,
}

/// Capability set of a slide deck model
///
/// Shape identifiers must remain stable while shapes are removed; a deck
/// may tombstone removed shapes instead of shifting positions.
pub trait SlideDeck: Send {
    /// Enumerate all shapes across all slides, slide-major order
    fn shapes(&self) -> Vec<ShapeInfo>;

    /// Replace a text shape's content
    fn set_shape_text(&mut self, slide: usize, shape: usize, text: &str) -> Result<()>;

    /// Delete a shape outright
    fn remove_shape(&mut self, slide: usize, shape: usize) -> Result<()>;

    /// Serialize the deck
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// Serde-backed in-memory deck (JSON on disk)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDeck {
    slides: Vec<MemorySlide>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MemorySlide {
    shapes: Vec<Option<MemoryShape>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MemoryShape {
    kind: ShapeKind,
    #[serde(default)]
    text: Option<String>,
}

impl MemoryDeck {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| ScourError::load(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| ScourError::load(path, e))
    }

    /// Deck with no slides
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slide built from `(kind, text)` pairs
    pub fn add_slide(&mut self, shapes: Vec<(ShapeKind, Option<String>)>) {
        self.slides.push(MemorySlide {
            shapes: shapes
                .into_iter()
                .map(|(kind, text)| Some(MemoryShape { kind, text }))
                .collect(),
        });
    }

    fn shape_mut(&mut self, slide: usize, shape: usize) -> Result<&mut Option<MemoryShape>> {
        self.slides
            .get_mut(slide)
            .and_then(|s| s.shapes.get_mut(shape))
            .ok_or_else(|| ScourError::Other(format!("no shape {shape} on slide {slide}")))
    }
}

impl SlideDeck for MemoryDeck {
    fn shapes(&self) -> Vec<ShapeInfo> {
        let mut infos = Vec::new();
        for (slide_idx, slide) in self.slides.iter().enumerate() {
            for (shape_idx, shape) in slide.shapes.iter().enumerate() {
                if let Some(shape) = shape {
                    infos.push(ShapeInfo {
                        slide: slide_idx,
                        shape: shape_idx,
                        kind: shape.kind,
                        text: shape.text.clone(),
                    });
                }
            }
        }
        infos
    }

    fn set_shape_text(&mut self, slide: usize, shape: usize, text: &str) -> Result<()> {
        match self.shape_mut(slide, shape)? {
            Some(s) => {
                s.text = Some(text.to_string());
                Ok(())
            }
            None => Err(ScourError::Other(format!(
                "shape {shape} on slide {slide} was removed"
            ))),
        }
    }

    fn remove_shape(&mut self, slide: usize, shape: usize) -> Result<()> {
        // Tombstone rather than shift, so shape ids stay stable.
        *self.shape_mut(slide, shape)? = None;
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self).map_err(|e| ScourError::save(path, e))?;
        std::fs::write(path, json).map_err(|e| ScourError::save(path, e))
    }
}

/// Adapter over any [`SlideDeck`]
pub struct SlideAdapter {
    deck: Box<dyn SlideDeck>,
    shapes: Vec<ShapeInfo>,
    cursor: usize,
}

impl SlideAdapter {
    pub fn new(deck: Box<dyn SlideDeck>) -> Self {
        let shapes = deck.shapes();
        Self {
            deck,
            shapes,
            cursor: 0,
        }
    }

    /// Load a JSON-backed deck from disk
    pub fn load_memory_deck(path: &Path) -> Result<Self> {
        Ok(Self::new(Box::new(MemoryDeck::load(path)?)))
    }
}

impl DocumentAdapter for SlideAdapter {
    fn next_unit(&mut self) -> Option<TextUnit> {
        while self.cursor < self.shapes.len() {
            let index = self.cursor;
            self.cursor += 1;
            let info = &self.shapes[index];

            if info.kind != ShapeKind::Text {
                continue;
            }
            match &info.text {
                Some(text) if !text.trim().is_empty() => {
                    return Some(TextUnit {
                        index,
                        text: text.clone(),
                        location: format!("slide {}", info.slide + 1),
                    });
                }
                _ => continue,
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
        let info = &self.shapes[unit.index];
        let cleaned = redact(&unit.text, plan, action);
        self.deck.set_shape_text(info.slide, info.shape, &cleaned)?;

        Ok(plan
            .iter()
            .map(|span| SpanApplication {
                span: span.clone(),
                outcome: SpanOutcome::Rewritten,
            })
            .collect())
    }

    fn remove_embedded_pictures(&mut self) -> Result<Vec<String>> {
        let mut removed = Vec::new();
        for info in &self.shapes {
            if info.kind == ShapeKind::Picture {
                self.deck.remove_shape(info.slide, info.shape)?;
                removed.push(format!("slide {}", info.slide + 1));
            }
        }
        Ok(removed)
    }

    fn commit(&mut self, output: &Path) -> Result<()> {
        self.deck.save(output)
    }
}
