//! Flow document tree.
//!
//! The tree mirrors the block sequence one to one, except that a blank
//! paragraph follows every table. Pagination is left to the viewer.

use serde::{Deserialize, Serialize};

use crate::render::PageSize;

/// Highest heading rank the flow format distinguishes.
pub const MAX_FLOW_HEADING_LEVEL: u8 = 3;

/// Full table width in fiftieths of a percent.
pub const FULL_WIDTH_PCT: u32 = 5000;

/// Map a block heading level onto the three flow ranks; level 4 becomes 3.
pub fn flow_heading_level(level: u8) -> u8 {
    level.clamp(1, MAX_FLOW_HEADING_LEVEL)
}

/// A flow document ready to be packaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    /// Title paragraph at the top of the document
    pub title: String,

    /// Section page size
    #[serde(skip)]
    pub page_size: PageSize,

    /// Body nodes in document order
    pub nodes: Vec<FlowNode>,
}

impl FlowDocument {
    /// Create an empty document.
    pub fn new(title: impl Into<String>, page_size: PageSize) -> Self {
        Self {
            title: title.into(),
            page_size,
            nodes: Vec::new(),
        }
    }

    /// Number of heading nodes.
    pub fn heading_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, FlowNode::Heading { .. }))
            .count()
    }

    /// Number of table nodes.
    pub fn table_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, FlowNode::Table(_)))
            .count()
    }

    /// Hyperlink runs across the whole document.
    pub fn hyperlinks(&self) -> Vec<&str> {
        self.nodes.iter().flat_map(FlowNode::hyperlinks).collect()
    }
}

/// A node of the flow document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowNode {
    /// Heading paragraph of rank 1-3
    Heading { level: u8, runs: Vec<FlowRun> },
    /// Body paragraph
    Paragraph { runs: Vec<FlowRun> },
    /// Table
    Table(FlowTable),
    /// Empty spacing paragraph
    Blank,
}

impl FlowNode {
    fn runs(&self) -> Box<dyn Iterator<Item = &FlowRun> + '_> {
        match self {
            FlowNode::Heading { runs, .. } | FlowNode::Paragraph { runs } => Box::new(runs.iter()),
            FlowNode::Table(table) => Box::new(
                table
                    .rows
                    .iter()
                    .flat_map(|r| r.cells.iter())
                    .flat_map(|c| c.runs.iter()),
            ),
            FlowNode::Blank => Box::new(std::iter::empty()),
        }
    }

    /// Targets of the hyperlink runs in this node.
    pub fn hyperlinks(&self) -> Vec<&str> {
        self.runs().filter_map(FlowRun::url).collect()
    }
}

/// An inline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowRun {
    /// Plain run
    Text { text: String },
    /// Hyperlink field run, underlined and colored
    Hyperlink { text: String, url: String },
}

impl FlowRun {
    /// Visible text.
    pub fn text(&self) -> &str {
        match self {
            FlowRun::Text { text } | FlowRun::Hyperlink { text, .. } => text,
        }
    }

    /// Hyperlink target.
    pub fn url(&self) -> Option<&str> {
        match self {
            FlowRun::Hyperlink { url, .. } => Some(url),
            FlowRun::Text { .. } => None,
        }
    }
}

/// A table node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowTable {
    /// Rows in order; the first is the header
    pub rows: Vec<FlowRow>,
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRow {
    /// Cells of this row
    pub cells: Vec<FlowCell>,
    /// Header row: shaded background and bold text
    pub header: bool,
}

impl FlowRow {
    /// Build a row whose cells split the full width equally.
    pub fn new(cells: Vec<Vec<FlowRun>>, header: bool) -> Self {
        let width = FULL_WIDTH_PCT / cells.len().max(1) as u32;
        Self {
            cells: cells
                .into_iter()
                .map(|runs| FlowCell { runs, width })
                .collect(),
            header,
        }
    }
}

/// A table cell holding one paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowCell {
    /// Runs of the cell paragraph
    pub runs: Vec<FlowRun>,
    /// Width in fiftieths of a percent of the table width
    pub width: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_mapping() {
        assert_eq!(flow_heading_level(1), 1);
        assert_eq!(flow_heading_level(3), 3);
        assert_eq!(flow_heading_level(4), 3);
    }

    #[test]
    fn test_row_widths_split_equally() {
        let row = FlowRow::new(vec![vec![], vec![], vec![], vec![]], false);
        assert!(row.cells.iter().all(|c| c.width == 1250));

        let row = FlowRow::new(vec![vec![]; 3], true);
        assert_eq!(row.cells[0].width, 1666);
    }

    #[test]
    fn test_hyperlinks_collected_from_tables() {
        let mut doc = FlowDocument::new("T", PageSize::A4);
        doc.nodes.push(FlowNode::Table(FlowTable {
            rows: vec![FlowRow::new(
                vec![vec![FlowRun::Hyperlink {
                    text: "Buy".into(),
                    url: "http://shop.test/x".into(),
                }]],
                false,
            )],
        }));
        doc.nodes.push(FlowNode::Blank);
        assert_eq!(doc.hyperlinks(), vec!["http://shop.test/x"]);
        assert_eq!(doc.table_count(), 1);
    }
}
