//! Pipe table detection.

use std::sync::OnceLock;

use regex::Regex;

use super::inline::parse_inline;
use crate::model::{Table, TableCell, TableRow};

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\|?[\s\-|:]+\|?\s*$").unwrap())
}

/// A table split into raw cell strings, before inline parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Inline-parse every cell into the model table.
    pub fn build(&self) -> Table {
        let header = build_row(&self.header);
        let mut table = Table::new(header);
        for row in &self.rows {
            table.add_row(build_row(row));
        }
        table
    }
}

fn build_row(cells: &[String]) -> TableRow {
    TableRow::new(
        cells
            .iter()
            .map(|cell| TableCell::new(parse_inline(cell)))
            .collect(),
    )
}

/// Check whether a line is a header separator (`--|--`, `|:---|---:|`).
pub(crate) fn is_separator(line: &str) -> bool {
    line.contains('-') && separator_regex().is_match(line)
}

/// Try to read a block as a pipe table.
///
/// Needs at least two lines, a pipe somewhere, and a separator as the
/// second line. Anything else yields `None` and the block is classified
/// by the remaining rules.
pub(crate) fn split_table(block: &str) -> Option<RawTable> {
    if !block.contains('|') {
        return None;
    }
    let lines: Vec<&str> = block.lines().collect();
    if lines.len() < 2 || !is_separator(lines[1]) {
        return None;
    }

    let header = split_row(lines[0]);
    let rows = lines[2..]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_row(line))
        .collect();

    Some(RawTable { header, rows })
}

/// Split one table line into trimmed cells, dropping the empty cells that
/// a leading or trailing pipe produces.
pub(crate) fn split_row(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line
        .trim()
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect();

    if cells.len() > 1 && cells.first().is_some_and(String::is_empty) {
        cells.remove(0);
    }
    if cells.len() > 1 && cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
    cells
}
