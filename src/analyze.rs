//! Analyze-then-export flow.
//!
//! The model call that turns raw content into Markdown lives outside this
//! crate behind [`ContentAnalyzer`]. It must resolve before any Markdown
//! reaches the renderers; a failure is reported once and never retried.

use std::path::Path;

use crate::detect::OutputFormat;
use crate::error::{Error, Result};
use crate::model::{ContentKind, ExtractedData};
use crate::render::{docx, pdf, ExportOptions, ExportResult};

/// External collaborator that converts raw content into structured Markdown.
pub trait ContentAnalyzer {
    /// Analyze `content` of the given kind.
    ///
    /// Failures should be returned as [`Error::Analysis`] with a message
    /// suitable for showing to the user.
    fn analyze(
        &self,
        content: &[u8],
        kind: ContentKind,
        mime_hint: Option<&str>,
    ) -> Result<ExtractedData>;
}

impl<F> ContentAnalyzer for F
where
    F: Fn(&[u8], ContentKind, Option<&str>) -> Result<ExtractedData>,
{
    fn analyze(
        &self,
        content: &[u8],
        kind: ContentKind,
        mime_hint: Option<&str>,
    ) -> Result<ExtractedData> {
        self(content, kind, mime_hint)
    }
}

/// Outcome of a successful analyze-then-export call.
#[derive(Debug, Clone)]
pub struct AnalysisExport {
    /// The analysis the document was built from
    pub data: ExtractedData,
    /// The written artifact
    pub result: ExportResult,
}

/// Render Markdown into the requested format.
pub fn export_markdown(
    markdown: &str,
    format: OutputFormat,
    options: &ExportOptions,
) -> Result<ExportResult> {
    match format {
        OutputFormat::Pdf => pdf::to_pdf(markdown, options),
        OutputFormat::Docx => docx::to_docx(markdown, options),
    }
}

/// Analyze content, then export the resulting Markdown to `path`.
///
/// Analyzer errors other than [`Error::Analysis`] are wrapped into one so the
/// caller sees a single descriptive message.
pub fn export_analysis<A, P>(
    analyzer: &A,
    content: &[u8],
    kind: ContentKind,
    mime_hint: Option<&str>,
    format: OutputFormat,
    path: P,
    options: &ExportOptions,
) -> Result<AnalysisExport>
where
    A: ContentAnalyzer + ?Sized,
    P: AsRef<Path>,
{
    let data = analyzer
        .analyze(content, kind, mime_hint)
        .map_err(|e| match e {
            Error::Analysis(msg) => Error::Analysis(msg),
            other => Error::Analysis(other.to_string()),
        })?;

    log::debug!(
        "Analysis of {} content finished: detected type '{}', {} bytes of Markdown",
        kind,
        data.detected_type,
        data.markdown.len()
    );
    if data.markdown.trim().is_empty() {
        log::warn!("Analyzer returned empty Markdown; exporting title only");
    }

    let result = export_markdown(&data.markdown, format, options)?;
    result.save(path)?;

    Ok(AnalysisExport { data, result })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(content: &[u8], _kind: ContentKind, _mime: Option<&str>) -> Result<ExtractedData> {
        let text = String::from_utf8_lossy(content).into_owned();
        Ok(ExtractedData {
            raw_text: text.clone(),
            markdown: format!("# Echo\n{}", text),
            summary: "echo".into(),
            detected_type: "note".into(),
            metadata: None,
        })
    }

    #[test]
    fn test_export_analysis_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        let out = export_analysis(
            &echo,
            b"hello",
            ContentKind::Text,
            Some("text/plain"),
            OutputFormat::Docx,
            &path,
            &ExportOptions::default(),
        )
        .unwrap();

        assert_eq!(out.data.detected_type, "note");
        assert_eq!(out.result.stats.heading_count, 1);
        assert_eq!(std::fs::read(&path).unwrap(), out.result.bytes);
    }

    #[test]
    fn test_analyzer_failure_is_single_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let failing = |_: &[u8], _: ContentKind, _: Option<&str>| -> Result<ExtractedData> {
            Err(Error::Other("quota exceeded".into()))
        };

        let err = export_analysis(
            &failing,
            b"x",
            ContentKind::Image,
            None,
            OutputFormat::Pdf,
            &path,
            &ExportOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Analysis(ref msg) if msg == "quota exceeded"));
        assert!(!path.exists());
    }
}
