//! Word exporter.

use crate::error::Result;
use crate::render::{docx, ExportOptions, ExportResult};

use super::DocumentExporter;

/// Word (`.docx`) exporter.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter {
    _private: (),
}

impl DocxExporter {
    /// Create a new Word exporter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentExporter for DocxExporter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "word"
    }

    fn export(&self, markdown: &str, options: &ExportOptions) -> Result<ExportResult> {
        docx::to_docx(markdown, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_exporter() {
        let exporter = DocxExporter::new();
        assert!(exporter.supports_extension("docx"));

        let result = exporter.export("# T", &ExportOptions::default()).unwrap();
        // Zip local file header
        assert!(result.bytes.starts_with(b"PK\x03\x04"));
    }
}
