//! Document model types for classified Markdown content.
//!
//! This module defines the intermediate representation that bridges
//! Markdown classification and the output sinks. Blocks are produced in
//! document order and handed to a sink one at a time.

mod block;
mod extracted;
mod run;
mod table;

pub use block::{Block, MAX_HEADING_LEVEL};
pub use extracted::{AnalysisMetadata, ContentKind, ExtractedData};
pub use run::{link_count, plain_text, Run};
pub use table::{Cell, Table};
