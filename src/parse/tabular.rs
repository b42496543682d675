//! Tabular clipboard parser
//!
//! Spreadsheet copy operations put tab-separated cells and newline-separated
//! rows on the clipboard as plain text. This module decides whether a pasted
//! payload is such a grid and turns it into a `TableData`.

use crate::models::{HeaderDetection, HeaderSource, Row, TableData};

/// Classified clipboard payload
#[derive(Clone, Debug, PartialEq)]
pub enum ClipboardContent {
    Table(TableData),
    /// Anything that is not a grid, kept verbatim
    Text(String),
}

/// Classify a plain-text clipboard payload.
///
/// Empty and whitespace-only payloads fall through as text.
pub fn parse_clipboard(text: &str, detection: HeaderDetection) -> ClipboardContent {
    if is_tabular(text) {
        ClipboardContent::Table(parse_table(text, detection))
    } else {
        ClipboardContent::Text(text.to_string())
    }
}

/// A payload is tabular iff it has at least two non-empty lines and at
/// least one of them contains a tab.
pub fn is_tabular(text: &str) -> bool {
    let lines = non_empty_lines(text);
    lines.len() > 1 && lines.iter().any(|line| line.contains('\t'))
}

/// Build a table from any text. Never fails: input without a single
/// non-empty line yields a one-row, one-column table.
pub fn parse_table(text: &str, detection: HeaderDetection) -> TableData {
    let mut grid: Vec<Row> = non_empty_lines(text)
        .into_iter()
        .map(|line| line.split('\t').map(|cell| cell.trim().to_string()).collect())
        .collect();

    if grid.is_empty() {
        grid.push(vec![String::new()]);
    }

    let width = grid.iter().map(Vec::len).max().unwrap_or(1);
    for row in grid.iter_mut() {
        row.resize(width, String::new());
    }

    let first_row_is_header = match detection {
        HeaderDetection::FirstRow => true,
        HeaderDetection::Heuristic => looks_like_header(&grid[0]),
    };

    if first_row_is_header {
        let headers = grid.remove(0);
        TableData {
            headers,
            rows: grid,
            header_source: HeaderSource::FirstRow,
        }
    } else {
        TableData {
            headers: (0..width).map(column_label).collect(),
            rows: grid,
            header_source: HeaderSource::Synthesized,
        }
    }
}

/// A row reads as headers if any cell is non-empty and non-numeric.
///
/// Known limitation: an all-numeric header row (e.g. years) is taken for data.
pub fn looks_like_header(row: &[String]) -> bool {
    row.iter().any(|cell| !cell.is_empty() && !is_numeric(cell))
}

fn is_numeric(cell: &str) -> bool {
    cell.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Spreadsheet-style column label: 0 -> "A", 25 -> "Z", 26 -> "AA"
pub fn column_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

fn non_empty_lines(text: &str) -> Vec<&str> {
    text.split('\n').filter(|line| !line.trim().is_empty()).collect()
}
