//! Block-level types.

use super::run::{self, Run};
use super::Table;
use serde::{Deserialize, Serialize};

/// Deepest heading level the classifier recognizes.
pub const MAX_HEADING_LEVEL: u8 = 4;

/// One top-level structural unit of a Markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (level 1-4)
    Heading {
        /// Heading level
        level: u8,
        /// Inline content
        runs: Vec<Run>,
    },

    /// A paragraph or list line
    Paragraph {
        /// Inline content
        runs: Vec<Run>,
    },

    /// A pipe table
    Table(Table),
}

impl Block {
    /// Create a heading block; the level is clamped to 1-4.
    pub fn heading(level: u8, runs: Vec<Run>) -> Self {
        Block::Heading {
            level: level.clamp(1, MAX_HEADING_LEVEL),
            runs,
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(runs: Vec<Run>) -> Self {
        Block::Paragraph { runs }
    }

    /// Inline runs of a heading or paragraph.
    pub fn runs(&self) -> Option<&[Run]> {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } => Some(runs),
            Block::Table(_) => None,
        }
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Check if this is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Number of links carried by the block.
    pub fn link_count(&self) -> usize {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } => run::link_count(runs),
            Block::Table(t) => t.link_count(),
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } => run::plain_text(runs),
            Block::Table(t) => t.plain_text(),
        }
    }
}
