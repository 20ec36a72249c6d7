//! Analysis results handed over by the content analyzer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of content submitted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// PDF, office document or other text-bearing file
    Document,
    /// Still image
    Image,
    /// Audio or video
    Media,
    /// Web page fetched from a URL
    Url,
    /// Plain text pasted by the user
    Text,
}

impl ContentKind {
    /// Guess the content kind from a MIME type.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            ContentKind::Image
        } else if mime.starts_with("audio/") || mime.starts_with("video/") {
            ContentKind::Media
        } else if mime == "text/html" {
            ContentKind::Url
        } else if mime.starts_with("text/") {
            ContentKind::Text
        } else {
            ContentKind::Document
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContentKind::Document => "document",
            ContentKind::Image => "image",
            ContentKind::Media => "media",
            ContentKind::Url => "url",
            ContentKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Output of the content analyzer. Only `markdown` is rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    /// Raw text recovered from the source
    #[serde(default)]
    pub raw_text: String,

    /// Structured Markdown produced by the model
    pub markdown: String,

    /// Short summary of the content
    #[serde(default)]
    pub summary: String,

    /// Content type label detected by the model (e.g. "invoice")
    #[serde(default)]
    pub detected_type: String,

    /// Optional source metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AnalysisMetadata>,
}

impl ExtractedData {
    /// Wrap bare Markdown with no analysis details.
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            ..Default::default()
        }
    }
}

/// Metadata about the analyzed source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// Original file name or URL
    pub source_name: Option<String>,

    /// MIME type of the source
    pub mime_type: Option<String>,

    /// Size of the source in bytes
    pub size_bytes: Option<u64>,

    /// Model that produced the analysis
    pub model: Option<String>,

    /// When the analysis finished
    pub analyzed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_from_mime() {
        assert_eq!(ContentKind::from_mime("image/png"), ContentKind::Image);
        assert_eq!(ContentKind::from_mime("video/mp4"), ContentKind::Media);
        assert_eq!(ContentKind::from_mime("audio/mpeg"), ContentKind::Media);
        assert_eq!(ContentKind::from_mime("text/html"), ContentKind::Url);
        assert_eq!(ContentKind::from_mime("text/plain"), ContentKind::Text);
        assert_eq!(
            ContentKind::from_mime("application/pdf"),
            ContentKind::Document
        );
    }

    #[test]
    fn test_extracted_data_camel_case() {
        let json = r##"{
            "rawText": "Total 42",
            "markdown": "# Invoice",
            "summary": "An invoice",
            "detectedType": "invoice",
            "metadata": {"sourceName": "inv.pdf", "analyzedAt": "2024-05-01T10:00:00Z"}
        }"##;
        let data: ExtractedData = serde_json::from_str(json).unwrap();
        assert_eq!(data.markdown, "# Invoice");
        assert_eq!(data.detected_type, "invoice");
        let meta = data.metadata.unwrap();
        assert_eq!(meta.source_name.as_deref(), Some("inv.pdf"));
        assert!(meta.analyzed_at.is_some());
    }

    #[test]
    fn test_extracted_data_minimal() {
        let data: ExtractedData = serde_json::from_str(r#"{"markdown": "hi"}"#).unwrap();
        assert_eq!(data.markdown, "hi");
        assert!(data.summary.is_empty());
        assert!(data.metadata.is_none());
    }
}
