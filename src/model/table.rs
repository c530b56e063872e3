//! Table types.

use super::{inline_text, InlineContent};
use serde::{Deserialize, Serialize};

/// A pipe table with one header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header row
    pub header: TableRow,

    /// Body rows
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a table with the given header.
    pub fn new(header: TableRow) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Add a body row.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (based on the header).
    pub fn column_count(&self) -> usize {
        self.header.cells.len()
    }

    /// Plain text of the table, one row per line, cells joined by ` | `.
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.header)
            .chain(&self.rows)
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a row from cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub content: Vec<InlineContent>,
}

impl TableCell {
    /// Create a cell from inline content.
    pub fn new(content: Vec<InlineContent>) -> Self {
        Self { content }
    }

    /// Create a cell with plain text.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self::new(vec![InlineContent::text(text)])
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        inline_text(&self.content)
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}
