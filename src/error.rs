//! Error types for mdexport library.

use std::io;
use thiserror::Error;

/// Result type alias for mdexport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while exporting Markdown.
///
/// Parsing Markdown never fails: every line is classified as a heading,
/// table row or paragraph. Errors come from the output backends and the
/// filesystem, and are fatal for the export that raised them.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither Markdown nor an analysis JSON document.
    #[error("Unknown input format")]
    UnknownFormat,

    /// No exporter handles the requested output extension.
    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),

    /// The PDF backend failed to assemble or serialize the document.
    #[error("PDF writing error: {0}")]
    PdfWrite(String),

    /// The Word package could not be assembled.
    #[error("DOCX writing error: {0}")]
    DocxWrite(String),

    /// XML serialization failed while building a Word part.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The content analyzer failed; the message is meant for the user.
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// An export option has an unusable value.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfWrite(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::DocxWrite(err.to_string()),
        }
    }
}
