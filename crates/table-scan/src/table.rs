//! Forecast table access.
//!
//! The scanner only needs to read label and cell text and to replace a
//! data cell with a rendered glyph. Pages plug in through [`ForecastTable`].

use arrows_common::Color;

use crate::error::{ScanError, ScanResult};

/// Text view of one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Label cell text
    pub label: String,
    /// Data cell texts, left to right, label cell excluded
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new(label: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            label: label.into(),
            cells,
        }
    }
}

/// Replacement content for a wind cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPatch {
    /// Tooltip, the wind angle such as `275°`
    pub title: String,
    /// PNG at device scale
    pub png: Vec<u8>,
    /// Vector form of the same glyph
    pub svg: String,
    /// Display size in logical pixels
    pub width: f64,
    pub height: f64,
    /// Highlight for wind layers within the usable height
    pub background: Option<Color>,
}

/// A table whose wind cells can be annotated.
pub trait ForecastTable {
    /// Current rows in document order.
    ///
    /// A replaced cell keeps reporting its source text, so scanning an
    /// annotated table again yields the same readings.
    fn rows(&self) -> Vec<TableRow>;

    /// Replace the visible content of a data cell.
    fn replace_cell(&mut self, row: usize, column: usize, patch: CellPatch) -> ScanResult<()>;
}

#[derive(Debug, Clone, Default)]
struct MemoryRow {
    label: String,
    cells: Vec<(String, Option<CellPatch>)>,
}

/// In-memory table, useful for feeding rows from any source.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    rows: Vec<MemoryRow>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row<S: Into<String>>(&mut self, label: &str, cells: impl IntoIterator<Item = S>) {
        self.rows.push(MemoryRow {
            label: label.to_string(),
            cells: cells.into_iter().map(|c| (c.into(), None)).collect(),
        });
    }

    pub fn with_row<S: Into<String>>(
        mut self,
        label: &str,
        cells: impl IntoIterator<Item = S>,
    ) -> Self {
        self.push_row(label, cells);
        self
    }

    /// The patch applied to a cell, if any.
    pub fn patch(&self, row: usize, column: usize) -> Option<&CellPatch> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(column))
            .and_then(|(_, patch)| patch.as_ref())
    }

    pub fn patched_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|(_, patch)| patch.is_some())
            .count()
    }
}

impl ForecastTable for MemoryTable {
    fn rows(&self) -> Vec<TableRow> {
        self.rows
            .iter()
            .map(|r| TableRow {
                label: r.label.clone(),
                cells: r.cells.iter().map(|(text, _)| text.clone()).collect(),
            })
            .collect()
    }

    fn replace_cell(&mut self, row: usize, column: usize, patch: CellPatch) -> ScanResult<()> {
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.cells.get_mut(column))
            .ok_or(ScanError::NoSuchCell { row, column })?;
        cell.1 = Some(patch);
        Ok(())
    }
}
