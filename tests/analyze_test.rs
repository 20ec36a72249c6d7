//! Integration tests for the analyze-then-export flow.

use std::cell::Cell;

use mdexport::model::{AnalysisMetadata, ContentKind, ExtractedData};
use mdexport::{export_analysis, ContentAnalyzer, Error, ExportOptions, OutputFormat, Result};

/// Analyzer returning canned Markdown and counting calls.
struct MockAnalyzer {
    markdown: &'static str,
    calls: Cell<usize>,
}

impl MockAnalyzer {
    fn new(markdown: &'static str) -> Self {
        Self {
            markdown,
            calls: Cell::new(0),
        }
    }
}

impl ContentAnalyzer for MockAnalyzer {
    fn analyze(
        &self,
        content: &[u8],
        kind: ContentKind,
        mime_hint: Option<&str>,
    ) -> Result<ExtractedData> {
        self.calls.set(self.calls.get() + 1);
        Ok(ExtractedData {
            raw_text: String::from_utf8_lossy(content).into_owned(),
            markdown: self.markdown.to_string(),
            summary: format!("{} content", kind),
            detected_type: "invoice".into(),
            metadata: Some(AnalysisMetadata {
                mime_type: mime_hint.map(str::to_string),
                size_bytes: Some(content.len() as u64),
                ..Default::default()
            }),
        })
    }
}

/// Analyzer that always fails.
struct DownAnalyzer {
    calls: Cell<usize>,
}

impl ContentAnalyzer for DownAnalyzer {
    fn analyze(&self, _: &[u8], _: ContentKind, _: Option<&str>) -> Result<ExtractedData> {
        self.calls.set(self.calls.get() + 1);
        Err(Error::Analysis("model unavailable".into()))
    }
}

#[test]
fn test_analysis_exported_to_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.pdf");
    let analyzer = MockAnalyzer::new("# Invoice\n| Item | Link |\n| --- | --- |\n| Shoe | [Buy](http://shop.test/x) |");

    let out = export_analysis(
        &analyzer,
        b"raw invoice bytes",
        ContentKind::Document,
        Some("application/pdf"),
        OutputFormat::Pdf,
        &path,
        &ExportOptions::new().with_title("Invoice"),
    )
    .unwrap();

    assert_eq!(analyzer.calls.get(), 1);
    assert_eq!(out.data.detected_type, "invoice");
    assert_eq!(
        out.data.metadata.as_ref().and_then(|m| m.mime_type.as_deref()),
        Some("application/pdf")
    );
    assert_eq!(out.result.stats.table_count, 1);
    assert_eq!(out.result.stats.link_count, 1);
    assert_eq!(std::fs::read(&path).unwrap(), out.result.bytes);
}

#[test]
fn test_empty_markdown_exports_title_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.docx");
    let analyzer = MockAnalyzer::new("");

    let out = export_analysis(
        &analyzer,
        b"",
        ContentKind::Text,
        None,
        OutputFormat::Docx,
        &path,
        &ExportOptions::default(),
    )
    .unwrap();

    assert_eq!(out.result.stats.block_count(), 0);
    assert!(path.exists());
}

#[test]
fn test_failure_is_not_retried() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.pdf");
    let analyzer = DownAnalyzer {
        calls: Cell::new(0),
    };

    let err = export_analysis(
        &analyzer,
        b"x",
        ContentKind::Url,
        Some("text/html"),
        OutputFormat::Pdf,
        &path,
        &ExportOptions::default(),
    )
    .unwrap_err();

    assert_eq!(analyzer.calls.get(), 1);
    assert_eq!(err.to_string(), "Analysis failed: model unavailable");
    assert!(!path.exists());
}

#[test]
fn test_analysis_json_input_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("analysis.json");
    let data = ExtractedData {
        markdown: "# From JSON\n[Buy](http://shop.test/x)".into(),
        detected_type: "receipt".into(),
        ..Default::default()
    };
    std::fs::write(&input, serde_json::to_string(&data).unwrap()).unwrap();

    let loaded = mdexport::load_input(&input).unwrap();
    assert_eq!(loaded.format, mdexport::InputFormat::Analysis);
    assert_eq!(loaded.markdown, data.markdown);

    let out = dir.path().join("receipt.docx");
    let result = mdexport::MdExport::new()
        .write(&loaded.markdown, &out)
        .unwrap();
    assert_eq!(result.stats.link_count, 1);
    assert!(out.exists());
}
