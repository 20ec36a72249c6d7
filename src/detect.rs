//! Input and output format detection.

use crate::error::{Error, Result};
use crate::model::ExtractedData;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Kind of input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Plain Markdown text
    Markdown,
    /// JSON analysis result carrying Markdown (`ExtractedData`)
    Analysis,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Markdown => f.write_str("Markdown"),
            InputFormat::Analysis => f.write_str("analysis JSON"),
        }
    }
}

/// Magic bytes of binary formats that are certainly not Markdown.
const BINARY_MAGIC: [&[u8]; 3] = [b"%PDF-", b"PK\x03\x04", b"\x89PNG"];

/// Markdown to render, with the analysis it came from if any.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    /// Detected input format
    pub format: InputFormat,
    /// Markdown to render
    pub markdown: String,
    /// Full analysis result for JSON inputs
    pub analysis: Option<ExtractedData>,
}

/// Detect the input format of some text.
///
/// A document whose first non-blank character is `{` and that deserializes
/// as an analysis result is [`InputFormat::Analysis`]; anything else is
/// Markdown, since every line of text is valid Markdown.
pub fn detect_input_from_str(content: &str) -> InputFormat {
    if content.trim_start().starts_with('{')
        && serde_json::from_str::<ExtractedData>(content).is_ok()
    {
        InputFormat::Analysis
    } else {
        InputFormat::Markdown
    }
}

/// Detect the input format of raw bytes.
///
/// Returns [`Error::UnknownFormat`] for binary data.
pub fn detect_input_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if BINARY_MAGIC.iter().any(|magic| data.starts_with(magic)) {
        return Err(Error::UnknownFormat);
    }
    let text = std::str::from_utf8(data).map_err(|_| Error::UnknownFormat)?;
    Ok(detect_input_from_str(text))
}

/// Parse input text into Markdown plus optional analysis.
pub fn load_input_from_str(content: &str) -> Result<LoadedInput> {
    match detect_input_from_str(content) {
        InputFormat::Analysis => {
            let data: ExtractedData = serde_json::from_str(content)?;
            Ok(LoadedInput {
                format: InputFormat::Analysis,
                markdown: data.markdown.clone(),
                analysis: Some(data),
            })
        }
        InputFormat::Markdown => Ok(LoadedInput {
            format: InputFormat::Markdown,
            markdown: content.to_string(),
            analysis: None,
        }),
    }
}

/// Read a Markdown or analysis JSON file.
pub fn load_input<P: AsRef<Path>>(path: P) -> Result<LoadedInput> {
    let data = std::fs::read(path)?;
    detect_input_from_bytes(&data)?;
    let text = String::from_utf8(data).map_err(|_| Error::UnknownFormat)?;
    load_input_from_str(&text)
}

/// Document format to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Paginated PDF
    Pdf,
    /// Word flow document
    Docx,
}

impl OutputFormat {
    /// All output formats.
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Pdf, OutputFormat::Docx];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    /// Detect the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(OutputFormat::Pdf),
            "docx" => Some(OutputFormat::Docx),
            _ => None,
        }
    }

    /// Detect the format from an output path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedOutput(path.display().to_string()))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pdf => f.write_str("PDF"),
            OutputFormat::Docx => f.write_str("Word"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Ok(OutputFormat::Docx),
            other => {
                Self::from_extension(other).ok_or_else(|| Error::UnsupportedOutput(other.into()))
            }
        }
    }
}
