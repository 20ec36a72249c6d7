//! Pipe table accumulation.
//!
//! Consecutive `|`-prefixed lines form one table. The first data line is the
//! header, separator lines (containing `---`) are dropped, and every other
//! line becomes a body row. Column counts are not checked.

use crate::model::{Cell, Table};

use super::inline::{extract_runs, whole_cell_link};

/// Buffers the rows of the table currently being read.
#[derive(Debug, Default)]
pub struct TableAccumulator {
    active: bool,
    header: Option<Vec<Cell>>,
    rows: Vec<Vec<Cell>>,
}

impl TableAccumulator {
    /// Create an inactive accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a table region is open.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of body rows buffered so far.
    pub fn buffered_rows(&self) -> usize {
        self.rows.len()
    }

    /// Feed one trimmed `|`-prefixed line; opens the table if needed.
    pub fn push_line(&mut self, line: &str) {
        self.active = true;
        if is_separator_row(line) {
            return;
        }

        let cells = parse_row(line);
        if self.header.is_none() {
            self.header = Some(cells);
        } else {
            self.rows.push(cells);
        }
    }

    /// Close the table region and return the finished table.
    ///
    /// Returns `None` when no header was captured, so flushing twice (or
    /// flushing a region of separator lines only) emits nothing.
    pub fn flush(&mut self) -> Option<Table> {
        self.active = false;
        let header = self.header.take()?;
        let rows = std::mem::take(&mut self.rows);

        let table = Table { header, rows };
        if table.is_ragged() {
            log::debug!(
                "table with {} header cells has ragged body rows",
                table.header.len()
            );
        }
        log::debug!(
            "flushed table: {} columns, {} body rows",
            table.column_count(),
            table.row_count()
        );
        Some(table)
    }
}

/// Check if a table line is the header/body separator.
pub fn is_separator_row(line: &str) -> bool {
    line.contains("---")
}

/// Split a pipe row into trimmed fields.
///
/// Only the empty field before the leading pipe and after the trailing pipe
/// are dropped; empty cells in the middle are kept so columns stay aligned.
pub fn split_row(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.first().is_some_and(|f| f.is_empty()) {
        fields.remove(0);
    }
    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Build a cell from one field, checking for a whole-cell link first.
pub fn parse_cell(field: &str) -> Cell {
    match whole_cell_link(field) {
        Some((label, url)) => Cell::link(label, url),
        None => Cell::new(extract_runs(field)),
    }
}

/// Split a pipe row and build its cells.
pub fn parse_row(line: &str) -> Vec<Cell> {
    split_row(line).into_iter().map(parse_cell).collect()
}
