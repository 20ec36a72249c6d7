//! Exporter registry providing a plugin architecture for output formats.
//!
//! Exporters are registered under the file extensions they produce, and
//! exports are dispatched on the extension of the requested output path.
//!
//! # Example
//!
//! ```no_run
//! use mdexport::export::ExporterRegistry;
//! use mdexport::render::ExportOptions;
//! use std::path::Path;
//!
//! fn main() -> mdexport::Result<()> {
//!     let registry = ExporterRegistry::with_defaults();
//!     let result = registry.export_to_path(
//!         "# Report\nAll good.",
//!         Path::new("report.docx"),
//!         &ExportOptions::default(),
//!     )?;
//!     println!("{} bytes", result.len());
//!     Ok(())
//! }
//! ```

mod docx;
mod pdf;

pub use docx::DocxExporter;
pub use pdf::PdfExporter;

use crate::error::{Error, Result};
use crate::render::{ExportOptions, ExportResult};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for output formats.
///
/// Implement this trait to add a new output format.
pub trait DocumentExporter: Send + Sync {
    /// File extensions this exporter produces.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this exporter.
    fn name(&self) -> &str;

    /// Render Markdown into a finished artifact.
    fn export(&self, markdown: &str, options: &ExportOptions) -> Result<ExportResult>;

    /// Check if this exporter produces the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document exporters.
pub struct ExporterRegistry {
    exporters: HashMap<String, Arc<dyn DocumentExporter>>,
    by_name: HashMap<String, Arc<dyn DocumentExporter>>,
}

impl ExporterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            exporters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the PDF and Word exporters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfExporter::new()));
        registry.register(Arc::new(DocxExporter::new()));
        registry
    }

    /// Register an exporter for all its extensions.
    pub fn register(&mut self, exporter: Arc<dyn DocumentExporter>) {
        for ext in exporter.supported_extensions() {
            self.exporters.insert(ext.to_lowercase(), exporter.clone());
        }
        self.by_name.insert(exporter.name().to_lowercase(), exporter);
    }

    /// Get an exporter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentExporter>> {
        self.exporters.get(&ext.to_lowercase()).cloned()
    }

    /// Get an exporter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentExporter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.exporters.contains_key(&ext.to_lowercase())
    }

    /// All supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.exporters.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Render with the exporter registered for `ext`.
    pub fn export(&self, markdown: &str, ext: &str, options: &ExportOptions) -> Result<ExportResult> {
        let exporter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedOutput(ext.to_string()))?;
        exporter.export(markdown, options)
    }

    /// Render and write to `path`, choosing the exporter by its extension.
    ///
    /// The artifact is fully built before anything is written.
    pub fn export_to_path(
        &self,
        markdown: &str,
        path: &Path,
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedOutput(path.display().to_string()))?;

        let result = self.export(markdown, ext, options)?;
        result.save(path)?;
        log::debug!("Wrote {} ({} bytes)", path.display(), result.len());
        Ok(result)
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = ExporterRegistry::with_defaults();
        assert!(registry.supports("pdf"));
        assert!(registry.supports("DOCX"));
        assert!(!registry.supports("html"));
        assert_eq!(registry.supported_extensions(), vec!["docx", "pdf"]);
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ExporterRegistry::with_defaults();
        assert_eq!(registry.get_by_name("Word").unwrap().name(), "word");
        assert!(registry.get_by_extension("pdf").is_some());
    }

    #[test]
    fn test_unsupported_extension() {
        let registry = ExporterRegistry::with_defaults();
        let err = registry
            .export("text", "odt", &ExportOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedOutput(ext) if ext == "odt"));
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let registry = ExporterRegistry::with_defaults();
        let result = registry
            .export_to_path("# T\nbody", &path, &ExportOptions::default())
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), result.bytes);

        let missing = dir.path().join("no_extension");
        assert!(registry
            .export_to_path("x", &missing, &ExportOptions::default())
            .is_err());
        assert!(!missing.exists());
    }
}
