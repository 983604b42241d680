//! Spreadsheet adapter
//!
//! One text unit per string-valued cell. Non-string cells (numbers, bools,
//! dates) are never passed to detection but are preserved through commit.
//! Redacted workbooks are re-serialized from the cell grid; cell formatting
//! is collapsed in the process, the same trade-off the word adapter makes
//! with run formatting.

use crate::adapters::{DocumentAdapter, SpanApplication, SpanOutcome, TextUnit};
use crate::domain::{Result, ScourError};
use crate::redaction::{redact, RedactionAction, RedactionPlan};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone)]
enum CellPayload {
    Text(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug)]
struct SheetGrid {
    name: String,
    cells: BTreeMap<(u32, u32), CellPayload>,
}

/// Native address of one enumerated unit
#[derive(Debug, Clone, Copy)]
struct CellAddr {
    sheet: usize,
    row: u32,
    col: u32,
}

/// Adapter for xlsx/xls workbooks
pub struct SpreadsheetAdapter {
    sheets: Vec<SheetGrid>,
    units: Vec<CellAddr>,
    cursor: usize,
}

impl SpreadsheetAdapter {
    /// Load a workbook into an in-memory cell grid
    pub fn load(path: &Path) -> Result<Self> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| ScourError::load(path, e))?;

        let mut sheets = Vec::new();
        let mut units = Vec::new();

        for (sheet_idx, (name, range)) in workbook.worksheets().into_iter().enumerate() {
            let (row0, col0) = range.start().unwrap_or((0, 0));
            let mut cells = BTreeMap::new();

            for (row, col, data) in range.used_cells() {
                let row = row0 + row as u32;
                let col = col0 + col as u32;
                let payload = match data {
                    Data::String(s) => CellPayload::Text(s.clone()),
                    Data::Int(i) => CellPayload::Number(*i as f64),
                    Data::Float(f) => CellPayload::Number(*f),
                    Data::Bool(b) => CellPayload::Bool(*b),
                    Data::DateTime(dt) => CellPayload::Number(dt.as_f64()),
                    Data::DateTimeIso(s) | Data::DurationIso(s) => {
                        CellPayload::Text(s.clone())
                    }
                    Data::Error(_) | Data::Empty => continue,
                };
                if matches!(payload, CellPayload::Text(_)) {
                    units.push(CellAddr {
                        sheet: sheet_idx,
                        row,
                        col,
                    });
                }
                cells.insert((row, col), payload);
            }

            sheets.push(SheetGrid { name, cells });
        }

        Ok(Self {
            sheets,
            units,
            cursor: 0,
        })
    }

    fn location(&self, addr: CellAddr) -> String {
        format!(
            "sheet {}!{}",
            self.sheets[addr.sheet].name,
            cell_name(addr.row, addr.col)
        )
    }
}

impl DocumentAdapter for SpreadsheetAdapter {
    fn next_unit(&mut self) -> Option<TextUnit> {
        while self.cursor < self.units.len() {
            let index = self.cursor;
            self.cursor += 1;
            let addr = self.units[index];
            if let Some(CellPayload::Text(text)) = self.sheets[addr.sheet].cells.get(&(addr.row, addr.col))
            {
                return Some(TextUnit {
                    index,
                    text: text.clone(),
                    location: self.location(addr),
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
        let addr = self.units[unit.index];
        let cleaned = redact(&unit.text, plan, action);
        self.sheets[addr.sheet]
            .cells
            .insert((addr.row, addr.col), CellPayload::Text(cleaned));

        Ok(plan
            .iter()
            .map(|span| SpanApplication {
                span: span.clone(),
                outcome: SpanOutcome::Rewritten,
            })
            .collect())
    }

    fn commit(&mut self, output: &Path) -> Result<()> {
        let mut workbook = rust_xlsxwriter::Workbook::new();

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .map_err(|e| ScourError::save(output, e))?;

            for (&(row, col), payload) in &sheet.cells {
                let col = col as u16;
                match payload {
                    CellPayload::Text(s) => worksheet.write_string(row, col, s),
                    CellPayload::Number(n) => worksheet.write_number(row, col, *n),
                    CellPayload::Bool(b) => worksheet.write_boolean(row, col, *b),
                }
                .map_err(|e| ScourError::save(output, e))?;
            }
        }

        workbook
            .save(output)
            .map_err(|e| ScourError::save(output, e))?;
        Ok(())
    }
}

/// A1-style cell name (row and col are zero-based)
fn cell_name(row: u32, col: u32) -> String {
    let mut letters = String::new();
    let mut n = col;
    loop {
        letters.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    format!("{letters}{}", row + 1)
}
