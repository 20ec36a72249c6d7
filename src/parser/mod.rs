//! Markdown classification.
//!
//! One pass over the input turns lines into [`Block`]s: headings,
//! paragraphs with inline runs, and accumulated pipe tables.

mod classifier;
mod cleanup;
mod inline;
mod table;

pub use classifier::{heading_marker, Blocks};
pub use cleanup::clean_markdown;
pub use inline::{extract_runs, strip_inline_markup, whole_cell_link};
pub use table::{is_separator_row, parse_cell, parse_row, split_row, TableAccumulator};

use crate::error::Result;
use crate::model::Block;
use crate::render::sink::{feed, BlockSink};

/// Iterate over the blocks of a Markdown string.
pub fn blocks(markdown: &str) -> Blocks<'_> {
    Blocks::new(markdown)
}

/// Classify a Markdown string into blocks.
pub fn parse_markdown(markdown: &str) -> Vec<Block> {
    blocks(markdown).collect()
}

/// Entry points of the one-pass classifier.
///
/// # Example
///
/// ```
/// use mdexport::parser::MarkdownParser;
/// use mdexport::model::Block;
///
/// let blocks: Vec<Block> = MarkdownParser::blocks("# Title\nHello world").collect();
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].heading_level(), Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    /// Lazy iterator over the blocks of `markdown`.
    pub fn blocks(markdown: &str) -> Blocks<'_> {
        Blocks::new(markdown)
    }

    /// Classify `markdown` into a block list.
    pub fn parse(markdown: &str) -> Vec<Block> {
        parse_markdown(markdown)
    }

    /// Classify `markdown` in one pass, handing each block to `sink` as soon
    /// as it is complete.
    pub fn run<S: BlockSink + ?Sized>(markdown: &str, sink: &mut S) -> Result<()> {
        feed(markdown, sink)
    }
}
