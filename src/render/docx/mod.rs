//! Word (OOXML) output.
//!
//! [`DocxSink`] turns blocks into a [`FlowDocument`]; [`write_docx`]
//! packages the tree as a `.docx` archive.

mod node;
mod writer;

pub use node::{
    flow_heading_level, FlowCell, FlowDocument, FlowNode, FlowRow, FlowRun, FlowTable,
    FULL_WIDTH_PCT, MAX_FLOW_HEADING_LEVEL,
};
pub use writer::write_docx;

use crate::error::Result;
use crate::model::{Cell, Run, Table};
use crate::render::sink::{feed, BlockSink, StatsSink};
use crate::render::{prepare_input, ExportOptions, ExportResult, ExportStats};

/// MIME type of the Word output.
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Render Markdown to `.docx` bytes.
pub fn to_docx(markdown: &str, options: &ExportOptions) -> Result<ExportResult> {
    let (doc, stats) = build(markdown, options)?;
    let bytes = write_docx(&doc)?;
    log::debug!(
        "DOCX rendered: {} nodes, {} hyperlinks, {} bytes",
        doc.nodes.len(),
        doc.hyperlinks().len(),
        bytes.len()
    );
    Ok(ExportResult::new(bytes, stats, DOCX_MIME))
}

/// Build the flow document tree without packaging it.
pub fn build_flow(markdown: &str, options: &ExportOptions) -> Result<FlowDocument> {
    build(markdown, options).map(|(doc, _)| doc)
}

fn build(markdown: &str, options: &ExportOptions) -> Result<(FlowDocument, ExportStats)> {
    let input = prepare_input(markdown, options);
    let mut sink = StatsSink::new(DocxSink::new(options));
    feed(&input, &mut sink)?;
    let (docx, stats) = sink.into_parts();
    Ok((docx.finish(), stats))
}

/// [`BlockSink`] that builds a flow document.
#[derive(Debug)]
pub struct DocxSink {
    doc: FlowDocument,
}

impl DocxSink {
    /// Start an empty document.
    pub fn new(options: &ExportOptions) -> Self {
        Self {
            doc: FlowDocument::new(options.title.as_str(), options.page_size),
        }
    }

    /// Finish and return the tree.
    pub fn finish(self) -> FlowDocument {
        self.doc
    }
}

impl BlockSink for DocxSink {
    fn emit_heading(&mut self, level: u8, runs: &[Run]) -> Result<()> {
        self.doc.nodes.push(FlowNode::Heading {
            level: flow_heading_level(level),
            runs: flow_runs(runs),
        });
        Ok(())
    }

    fn emit_paragraph(&mut self, runs: &[Run]) -> Result<()> {
        self.doc.nodes.push(FlowNode::Paragraph {
            runs: flow_runs(runs),
        });
        Ok(())
    }

    fn emit_table(&mut self, table: &Table) -> Result<()> {
        self.doc.nodes.push(FlowNode::Table(flow_table(table)));
        self.doc.nodes.push(FlowNode::Blank);
        Ok(())
    }
}

fn flow_runs(runs: &[Run]) -> Vec<FlowRun> {
    runs.iter()
        .filter(|run| !run.is_empty())
        .map(|run| match run {
            Run::Text { content } => FlowRun::Text {
                text: content.clone(),
            },
            Run::Link { label, url } => FlowRun::Hyperlink {
                text: label.clone(),
                url: url.clone(),
            },
        })
        .collect()
}

fn flow_cell(cell: &Cell) -> Vec<FlowRun> {
    match cell.whole_link() {
        Some((label, url)) => vec![FlowRun::Hyperlink {
            text: label.to_string(),
            url: url.to_string(),
        }],
        None => flow_runs(&cell.runs),
    }
}

/// Rows shorter than the header get empty trailing cells; longer rows keep
/// their own cell count and width split.
fn flow_table(table: &Table) -> FlowTable {
    let columns = table.header.len();
    let mut rows = Vec::with_capacity(table.rows.len() + 1);

    rows.push(FlowRow::new(
        table.header.iter().map(flow_cell).collect(),
        true,
    ));
    for row in &table.rows {
        let mut cells: Vec<Vec<FlowRun>> = row.iter().map(flow_cell).collect();
        if cells.len() < columns {
            cells.resize_with(columns, Vec::new);
        }
        rows.push(FlowRow::new(cells, false));
    }

    FlowTable { rows }
}
