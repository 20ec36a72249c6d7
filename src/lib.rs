//! # mdexport
//!
//! Deterministic export of loosely structured Markdown to paginated PDF and
//! Word documents.
//!
//! Markdown produced by a model is classified in one line-oriented pass into
//! headings, paragraphs with inline links, and pipe tables. The classified
//! blocks are fed to one of two output sinks: a paginated PDF layout with a
//! running cursor and clickable link regions, or a Word flow document with
//! heading styles, hyperlink runs and shaded table headers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdexport::{render_to_docx, render_to_pdf};
//!
//! fn main() -> mdexport::Result<()> {
//!     let markdown = "# Invoice\n| Item | Link |\n| --- | --- |\n| Shoe | [Buy](http://shop.test/x) |";
//!
//!     render_to_pdf(markdown, "invoice")?; // writes invoice.pdf
//!     render_to_docx(markdown, "invoice")?; // writes invoice.docx
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One pass, two formats**: blocks are classified once and dispatched
//!   through the [`BlockSink`] capability interface
//! - **Tables**: separator rows dropped, ragged rows accepted, whole-cell links
//! - **Pagination**: page breaks at block and table-row granularity
//! - **Deterministic output**: the same Markdown always gives the same bytes
//! - **Parallel batches**: independent exports run on Rayon
//! - **Async**: optional `async` feature writes with Tokio

pub mod analyze;
pub mod detect;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analyze::{export_analysis, export_markdown, AnalysisExport, ContentAnalyzer};
pub use detect::{load_input, InputFormat, LoadedInput, OutputFormat};
pub use error::{Error, Result};
pub use export::{DocumentExporter, ExporterRegistry};
pub use model::{Block, Cell, ContentKind, ExtractedData, Run, Table};
pub use parser::{extract_runs, parse_markdown, MarkdownParser, TableAccumulator};
pub use render::{
    to_json, BlockSink, CollectingSink, ExportOptions, ExportResult, ExportStats, JsonFormat,
    PageSize, StatsSink, DEFAULT_FILE_STEM, DEFAULT_TITLE,
};

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Output path for a caller-supplied file name.
///
/// An empty name becomes the fixed report name; a missing `.pdf`/`.docx`
/// extension is appended.
///
/// # Example
///
/// ```
/// use mdexport::{output_path, OutputFormat};
/// use std::path::PathBuf;
///
/// assert_eq!(output_path("", OutputFormat::Pdf), PathBuf::from("report.pdf"));
/// assert_eq!(output_path("q3", OutputFormat::Docx), PathBuf::from("q3.docx"));
/// assert_eq!(output_path("q3.PDF", OutputFormat::Pdf), PathBuf::from("q3.PDF"));
/// ```
pub fn output_path<P: AsRef<Path>>(filename: P, format: OutputFormat) -> PathBuf {
    let filename = filename.as_ref();
    let ext = format.extension();

    if filename.as_os_str().is_empty() {
        return PathBuf::from(format!("{}.{}", DEFAULT_FILE_STEM, ext));
    }

    let has_ext = filename
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext));
    if has_ext {
        return filename.to_path_buf();
    }

    let mut name = filename.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn render_to(markdown: &str, filename: &Path, format: OutputFormat) -> Result<PathBuf> {
    let path = output_path(filename, format);
    let result = export_markdown(markdown, format, &ExportOptions::default())?;
    result.save(&path)?;
    Ok(path)
}

/// Render Markdown to a paginated PDF file.
///
/// Returns the path written.
///
/// # Example
///
/// ```no_run
/// let path = mdexport::render_to_pdf("# Title\nHello world", "hello").unwrap();
/// assert_eq!(path.to_str(), Some("hello.pdf"));
/// ```
pub fn render_to_pdf<P: AsRef<Path>>(markdown: &str, filename: P) -> Result<PathBuf> {
    render_to(markdown, filename.as_ref(), OutputFormat::Pdf)
}

/// Render Markdown to a Word file.
///
/// Returns the path written.
pub fn render_to_docx<P: AsRef<Path>>(markdown: &str, filename: P) -> Result<PathBuf> {
    render_to(markdown, filename.as_ref(), OutputFormat::Docx)
}

/// Render Markdown to `path`, choosing the format by its extension.
///
/// # Example
///
/// ```no_run
/// let result = mdexport::render_to_document("# Title", "out/report.docx").unwrap();
/// println!("{} bytes", result.len());
/// ```
pub fn render_to_document<P: AsRef<Path>>(markdown: &str, path: P) -> Result<ExportResult> {
    ExporterRegistry::with_defaults().export_to_path(
        markdown,
        path.as_ref(),
        &ExportOptions::default(),
    )
}

/// Render Markdown to PDF bytes with default options.
pub fn to_pdf_bytes(markdown: &str) -> Result<Vec<u8>> {
    render::pdf::to_pdf(markdown, &ExportOptions::default()).map(|r| r.bytes)
}

/// Render Markdown to Word bytes with default options.
pub fn to_docx_bytes(markdown: &str) -> Result<Vec<u8>> {
    render::docx::to_docx(markdown, &ExportOptions::default()).map(|r| r.bytes)
}

/// One export in a batch.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Markdown to render
    pub markdown: String,
    /// Output path; its extension selects the format
    pub path: PathBuf,
    /// Export options
    pub options: ExportOptions,
}

impl ExportJob {
    /// Create a job with default options.
    pub fn new(markdown: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            markdown: markdown.into(),
            path: path.into(),
            options: ExportOptions::default(),
        }
    }

    /// Set export options.
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }
}

/// Run independent exports in parallel.
///
/// Each job owns its own layout state, so jobs never interfere. Results are
/// returned in job order; one failure does not stop the others.
pub fn export_many(jobs: &[ExportJob]) -> Vec<Result<ExportResult>> {
    let registry = ExporterRegistry::with_defaults();
    jobs.par_iter()
        .map(|job| registry.export_to_path(&job.markdown, &job.path, &job.options))
        .collect()
}

/// Render Markdown to a PDF file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn render_to_pdf_async<P: AsRef<Path>>(markdown: &str, filename: P) -> Result<PathBuf> {
    render_to_async(markdown, filename.as_ref(), OutputFormat::Pdf).await
}

/// Render Markdown to a Word file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn render_to_docx_async<P: AsRef<Path>>(
    markdown: &str,
    filename: P,
) -> Result<PathBuf> {
    render_to_async(markdown, filename.as_ref(), OutputFormat::Docx).await
}

#[cfg(feature = "async")]
async fn render_to_async(markdown: &str, filename: &Path, format: OutputFormat) -> Result<PathBuf> {
    let path = output_path(filename, format);
    let markdown = markdown.to_string();
    let result = tokio::task::spawn_blocking(move || {
        export_markdown(&markdown, format, &ExportOptions::default())
    })
    .await
    .map_err(|e| Error::Other(format!("render task failed: {}", e)))??;
    tokio::fs::write(&path, &result.bytes).await?;
    Ok(path)
}

/// Builder for exporting Markdown.
///
/// # Example
///
/// ```no_run
/// use mdexport::{MdExport, PageSize};
///
/// let result = MdExport::new()
///     .with_title("Invoice")
///     .with_page_size(PageSize::Letter)
///     .with_cleanup(true)
///     .write("# Total\n42", "invoice.pdf")?;
/// println!("{} pages", result.stats.page_count);
/// # Ok::<(), mdexport::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MdExport {
    options: ExportOptions,
}

impl MdExport {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from existing options.
    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.options = self.options.with_page_size(size);
        self
    }

    /// Enable input cleanup.
    pub fn with_cleanup(mut self, clean: bool) -> Self {
        self.options = self.options.with_clean_input(clean);
        self
    }

    /// Repeat table headers after page breaks.
    pub fn with_repeat_table_header(mut self, repeat: bool) -> Self {
        self.options = self.options.with_repeat_table_header(repeat);
        self
    }

    /// Current options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Render to PDF in memory.
    pub fn to_pdf(&self, markdown: &str) -> Result<ExportResult> {
        render::pdf::to_pdf(markdown, &self.options)
    }

    /// Render to Word in memory.
    pub fn to_docx(&self, markdown: &str) -> Result<ExportResult> {
        render::docx::to_docx(markdown, &self.options)
    }

    /// Render in the given format in memory.
    pub fn export(&self, markdown: &str, format: OutputFormat) -> Result<ExportResult> {
        export_markdown(markdown, format, &self.options)
    }

    /// Render and write to `path`; the extension selects the format.
    pub fn write<P: AsRef<Path>>(&self, markdown: &str, path: P) -> Result<ExportResult> {
        let path = path.as_ref();
        let result = self.export(markdown, OutputFormat::from_path(path)?)?;
        result.save(path)?;
        Ok(result)
    }
}
