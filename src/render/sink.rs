//! The capability interface every output format implements.
//!
//! Markdown is classified once; each block is then handed to a
//! [`BlockSink`]. Implementations exist for the paginated PDF format and the
//! Word flow format, and small sinks are provided for collecting blocks and
//! counting them.
//!
//! # Example
//!
//! ```
//! use mdexport::model::{Run, Table};
//! use mdexport::render::sink::{feed, BlockSink};
//!
//! #[derive(Default)]
//! struct HeadingCollector(Vec<String>);
//!
//! impl BlockSink for HeadingCollector {
//!     fn emit_heading(&mut self, _level: u8, runs: &[Run]) -> mdexport::Result<()> {
//!         self.0.push(mdexport::model::plain_text(runs));
//!         Ok(())
//!     }
//!     fn emit_paragraph(&mut self, _runs: &[Run]) -> mdexport::Result<()> {
//!         Ok(())
//!     }
//!     fn emit_table(&mut self, _table: &Table) -> mdexport::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut sink = HeadingCollector::default();
//! feed("# One\ntext\n## Two", &mut sink).unwrap();
//! assert_eq!(sink.0, vec!["One", "Two"]);
//! ```

use crate::error::Result;
use crate::model::{self, Block, Run, Table};
use crate::parser;

use super::ExportStats;

/// Consumer of classified blocks.
pub trait BlockSink {
    /// A heading of level 1-4.
    fn emit_heading(&mut self, level: u8, runs: &[Run]) -> Result<()>;

    /// A paragraph (or list line) with its inline runs.
    fn emit_paragraph(&mut self, runs: &[Run]) -> Result<()>;

    /// A finished table.
    fn emit_table(&mut self, table: &Table) -> Result<()>;
}

impl<S: BlockSink + ?Sized> BlockSink for &mut S {
    fn emit_heading(&mut self, level: u8, runs: &[Run]) -> Result<()> {
        (**self).emit_heading(level, runs)
    }

    fn emit_paragraph(&mut self, runs: &[Run]) -> Result<()> {
        (**self).emit_paragraph(runs)
    }

    fn emit_table(&mut self, table: &Table) -> Result<()> {
        (**self).emit_table(table)
    }
}

/// Route one block to the matching sink method.
pub fn emit_block<S: BlockSink + ?Sized>(sink: &mut S, block: &Block) -> Result<()> {
    match block {
        Block::Heading { level, runs } => sink.emit_heading(*level, runs),
        Block::Paragraph { runs } => sink.emit_paragraph(runs),
        Block::Table(table) => sink.emit_table(table),
    }
}

/// Classify `markdown` in one pass, emitting each block as it completes.
pub fn feed<S: BlockSink + ?Sized>(markdown: &str, sink: &mut S) -> Result<()> {
    for block in parser::blocks(markdown) {
        emit_block(sink, &block)?;
    }
    Ok(())
}

/// Sink that keeps every block.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    blocks: Vec<Block>,
}

impl CollectingSink {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Take the collected blocks.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl BlockSink for CollectingSink {
    fn emit_heading(&mut self, level: u8, runs: &[Run]) -> Result<()> {
        self.blocks.push(Block::heading(level, runs.to_vec()));
        Ok(())
    }

    fn emit_paragraph(&mut self, runs: &[Run]) -> Result<()> {
        self.blocks.push(Block::paragraph(runs.to_vec()));
        Ok(())
    }

    fn emit_table(&mut self, table: &Table) -> Result<()> {
        self.blocks.push(Block::Table(table.clone()));
        Ok(())
    }
}

/// Sink wrapper that counts blocks and links before forwarding.
#[derive(Debug)]
pub struct StatsSink<S> {
    inner: S,
    stats: ExportStats,
}

impl<S: BlockSink> StatsSink<S> {
    /// Wrap a sink.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            stats: ExportStats::new(),
        }
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &ExportStats {
        &self.stats
    }

    /// Unwrap into the inner sink and the statistics.
    pub fn into_parts(self) -> (S, ExportStats) {
        (self.inner, self.stats)
    }
}

impl<S: BlockSink> BlockSink for StatsSink<S> {
    fn emit_heading(&mut self, level: u8, runs: &[Run]) -> Result<()> {
        self.stats.add_heading();
        self.stats.add_links(model::link_count(runs));
        self.inner.emit_heading(level, runs)
    }

    fn emit_paragraph(&mut self, runs: &[Run]) -> Result<()> {
        self.stats.add_paragraph();
        self.stats.add_links(model::link_count(runs));
        self.inner.emit_paragraph(runs)
    }

    fn emit_table(&mut self, table: &Table) -> Result<()> {
        self.stats.add_table(table.row_count());
        self.stats.add_links(table.link_count());
        self.inner.emit_table(table)
    }
}
