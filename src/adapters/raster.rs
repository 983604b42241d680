//! Raster image adapter
//!
//! Text in images is reached through an OCR capability that produces a word
//! box stream: one text unit per recognized word, already geometry-addressed.
//! Redaction draws a filled rectangle over the word's bounding box, black
//! for Mask and white for Remove. Blank OCR tokens never reach detection.

use crate::adapters::{DocumentAdapter, SpanApplication, SpanOutcome, TextUnit};
use crate::domain::{Result, ScourError};
use crate::redaction::{RedactionAction, RedactionPlan};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One recognized word with its bounding box in pixel coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBox {
    pub text: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// OCR capability producing a word-box stream for an image
pub trait OcrEngine: Send + Sync {
    fn extract_word_boxes(&self, image: &Path) -> Result<Vec<WordBox>>;
}

/// OCR via the tesseract command-line tool in TSV mode
///
/// Shelling out keeps the native OCR stack out of the build; the binary
/// path is configurable for hosts where tesseract is not on PATH.
pub struct TesseractCli {
    binary: PathBuf,
}

impl TesseractCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl OcrEngine for TesseractCli {
    fn extract_word_boxes(&self, image: &Path) -> Result<Vec<WordBox>> {
        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .arg("tsv")
            .output()
            .map_err(|e| ScourError::Ocr(format!("failed to run {}: {e}", self.binary.display())))?;

        if !output.status.success() {
            return Err(ScourError::Ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_tsv(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse tesseract TSV output into word boxes
///
/// Columns: level page block par line word left top width height conf text.
/// Only level-5 rows are words; the rest describe layout hierarchy.
fn parse_tsv(tsv: &str) -> Result<Vec<WordBox>> {
    let mut boxes = Vec::new();

    for line in tsv.lines().skip(1) {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 || fields[0] != "5" {
            continue;
        }

        let parse = |idx: usize| -> Result<u32> {
            fields[idx]
                .parse()
                .map_err(|_| ScourError::Ocr(format!("bad TSV field {:?} in {line:?}", fields[idx])))
        };

        boxes.push(WordBox {
            x: parse(6)?,
            y: parse(7)?,
            width: parse(8)?,
            height: parse(9)?,
            text: fields[11].to_string(),
        });
    }

    Ok(boxes)
}

/// Adapter for png/jpeg images
#[derive(Debug)]
pub struct RasterAdapter {
    image: RgbImage,
    boxes: Vec<WordBox>,
    cursor: usize,
}

impl RasterAdapter {
    /// Decode the image and run OCR over it
    pub fn load(path: &Path, ocr: &dyn OcrEngine) -> Result<Self> {
        let image = image::open(path)
            .map_err(|e| ScourError::load(path, e))?
            .to_rgb8();
        let boxes = ocr.extract_word_boxes(path)?;

        Ok(Self {
            image,
            boxes,
            cursor: 0,
        })
    }

    fn fill_for(action: RedactionAction) -> Rgb<u8> {
        match action {
            RedactionAction::Mask => Rgb([0, 0, 0]),
            RedactionAction::Remove => Rgb([255, 255, 255]),
        }
    }
}

impl DocumentAdapter for RasterAdapter {
    fn next_unit(&mut self) -> Option<TextUnit> {
        while self.cursor < self.boxes.len() {
            let index = self.cursor;
            self.cursor += 1;

            let word = &self.boxes[index];
            if word.text.trim().is_empty() {
                continue;
            }
            return Some(TextUnit {
                index,
                text: word.text.clone(),
                location: format!("box {index}"),
            });
        }
        None
    }

    fn apply(
        &mut self,
        unit: &TextUnit,
        plan: &RedactionPlan,
        action: RedactionAction,
    ) -> Result<Vec<SpanApplication>> {
        let word = &self.boxes[unit.index];

        // The whole word box is painted once; spans inside one OCR word
        // cannot be painted individually.
        draw_filled_rect_mut(
            &mut self.image,
            Rect::at(word.x as i32, word.y as i32).of_size(word.width.max(1), word.height.max(1)),
            Self::fill_for(action),
        );

        Ok(plan
            .iter()
            .map(|span| SpanApplication {
                span: span.clone(),
                outcome: SpanOutcome::Boxed { rects: 1 },
            })
            .collect())
    }

    fn commit(&mut self, output: &Path) -> Result<()> {
        self.image
            .save(output)
            .map_err(|e| ScourError::save(output, e))
    }
}
