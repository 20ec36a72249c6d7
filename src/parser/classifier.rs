//! Line classification state machine.
//!
//! Lines are trimmed and classified one at a time. Outside a table a line is
//! a heading (`# ` to `#### `), the start of a table (`|`), blank, or
//! paragraph text. Inside a table every `|` line is handed to the
//! [`TableAccumulator`]; the first other line closes the table, which is
//! emitted before that line is classified again.

use std::str::Lines;

use crate::model::{Block, MAX_HEADING_LEVEL};

use super::inline::extract_runs;
use super::table::TableAccumulator;

/// Lazy iterator over the blocks of a Markdown string.
///
/// Each block is produced as soon as it is complete; nothing but the open
/// table is buffered.
#[derive(Debug)]
pub struct Blocks<'a> {
    lines: Lines<'a>,
    table: TableAccumulator,
    pending: Option<&'a str>,
}

impl<'a> Blocks<'a> {
    /// Start classifying `markdown`. A leading byte-order mark is skipped.
    pub fn new(markdown: &'a str) -> Self {
        Self {
            lines: markdown.strip_prefix('\u{feff}').unwrap_or(markdown).lines(),
            table: TableAccumulator::new(),
            pending: None,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        self.pending
            .take()
            .or_else(|| self.lines.next())
            .map(str::trim)
    }

    fn classify(&mut self, line: &str) -> Option<Block> {
        if line.is_empty() {
            return None;
        }
        if line.starts_with('|') {
            self.table.push_line(line);
            return None;
        }
        if let Some((level, text)) = heading_marker(line) {
            return Some(Block::heading(level, extract_runs(text)));
        }
        Some(Block::paragraph(extract_runs(line)))
    }
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        loop {
            let Some(line) = self.next_line() else {
                return self.table.flush().map(Block::Table);
            };

            if self.table.is_active() {
                if line.starts_with('|') {
                    self.table.push_line(line);
                    continue;
                }
                self.pending = Some(line);
                match self.table.flush() {
                    Some(table) => return Some(Block::Table(table)),
                    None => continue,
                }
            }

            if let Some(block) = self.classify(line) {
                return Some(block);
            }
        }
    }
}

/// Recognize `#`..`####` followed by a space; returns the level and text.
pub fn heading_marker(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL as usize {
        return None;
    }
    let rest = line[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, rest.trim()))
}
