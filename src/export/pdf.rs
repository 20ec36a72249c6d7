//! Paginated PDF exporter.

use crate::error::Result;
use crate::render::{pdf, ExportOptions, ExportResult};

use super::DocumentExporter;

/// PDF exporter.
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    _private: (),
}

impl PdfExporter {
    /// Create a new PDF exporter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentExporter for PdfExporter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn export(&self, markdown: &str, options: &ExportOptions) -> Result<ExportResult> {
        pdf::to_pdf(markdown, options)
    }
}
