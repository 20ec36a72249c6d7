//! Output formats.
//!
//! Both document formats are [`sink::BlockSink`] implementations fed from a
//! single classification pass: [`pdf`] lays blocks out on fixed-size pages,
//! [`docx`] builds a flow document that the consuming viewer paginates.

pub mod docx;
mod json;
mod options;
pub mod pdf;
mod result;
pub mod sink;

pub use json::{to_json, JsonFormat};
pub use options::{ExportOptions, PageSize, DEFAULT_FILE_STEM, DEFAULT_TITLE};
pub use result::{ExportResult, ExportStats};
pub use sink::{BlockSink, CollectingSink, StatsSink};

use std::borrow::Cow;

use crate::parser::clean_markdown;

/// Apply the cleanup rules when the options ask for them.
pub(crate) fn prepare_input<'a>(markdown: &'a str, options: &ExportOptions) -> Cow<'a, str> {
    if options.clean_input {
        Cow::Owned(clean_markdown(markdown))
    } else {
        Cow::Borrowed(markdown)
    }
}
