//! Grid data produced by the tabular paste parser

use serde::{Deserialize, Serialize};

use crate::error::{EditError, Result};

/// A row of plain-string cells
pub type Row = Vec<String>;

/// Where a table's header row came from
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HeaderSource {
    /// First pasted line
    FirstRow,
    /// Generated column letters (A, B, C, ...)
    Synthesized,
}

/// A parsed grid: one header row plus data rows, all of equal width
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TableData {
    pub headers: Row,
    pub rows: Vec<Row>,
    pub header_source: HeaderSource,
}

/// Address of a single cell inside a table
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CellPos {
    Header(usize),
    Body(usize, usize),
}

impl TableData {
    /// Number of columns (every row has this many cells)
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows, excluding the header row
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, pos: CellPos) -> Option<&str> {
        match pos {
            CellPos::Header(col) => self.headers.get(col),
            CellPos::Body(row, col) => self.rows.get(row).and_then(|r| r.get(col)),
        }
        .map(|s| s.as_str())
    }

    /// Replace the text of one cell in place
    pub fn set_cell(&mut self, pos: CellPos, text: &str) -> Result<()> {
        let (row_index, col, slot) = match pos {
            CellPos::Header(col) => (0, col, self.headers.get_mut(col)),
            CellPos::Body(row, col) => (
                row + 1,
                col,
                self.rows.get_mut(row).and_then(|r| r.get_mut(col)),
            ),
        };

        let cell = slot.ok_or(EditError::CellOutOfBounds { row: row_index, col })?;
        *cell = text.to_string();
        Ok(())
    }
}
