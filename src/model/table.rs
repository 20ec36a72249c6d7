//! Table types.

use super::run::{self, Run};
use serde::{Deserialize, Serialize};

/// A table cell: its parsed inline runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Inline content of the cell
    pub runs: Vec<Run>,

    /// The raw cell text was exactly one link span; `runs` holds that link
    /// and the whole cell is meant to be clickable.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub whole_link: bool,
}

impl Cell {
    /// Create a cell from runs.
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            whole_link: false,
        }
    }

    /// Create a plain text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Run::text(text)])
    }

    /// Create a whole-cell link.
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::link(label, url)],
            whole_link: true,
        }
    }

    /// Create an empty cell (used to pad ragged rows).
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Label and target of a whole-cell link.
    pub fn whole_link(&self) -> Option<(&str, &str)> {
        if !self.whole_link {
            return None;
        }
        match self.runs.as_slice() {
            [Run::Link { label, url }] => Some((label, url)),
            _ => None,
        }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        run::plain_text(&self.runs)
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}

/// A table: one header row and any number of body rows.
///
/// Rows are not required to have the header's column count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header cells
    pub header: Vec<Cell>,

    /// Body rows in document order
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table with the given header.
    pub fn new(header: Vec<Cell>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Add a body row.
    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row, header included.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    /// Check if any body row differs from the header's column count.
    pub fn is_ragged(&self) -> bool {
        self.rows.iter().any(|r| r.len() != self.header.len())
    }

    /// Header followed by body rows.
    pub fn all_rows(&self) -> impl Iterator<Item = &[Cell]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }

    /// Total link runs across all cells.
    pub fn link_count(&self) -> usize {
        self.all_rows()
            .flatten()
            .map(|c| run::link_count(&c.runs))
            .sum()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.all_rows()
            .map(|row| {
                row.iter()
                    .map(Cell::plain_text)
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
