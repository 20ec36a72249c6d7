//! Export options and configuration.

use std::str::FromStr;

use super::pdf::PdfStyle;

/// Title drawn in the header region when none is configured.
pub const DEFAULT_TITLE: &str = "Analysis Report";

/// File stem used when the caller supplies no output name.
pub const DEFAULT_FILE_STEM: &str = "report";

/// Options shared by all output formats.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Document title shown in the header region
    pub title: String,

    /// Paper size of the paginated output (and Word section)
    pub page_size: PageSize,

    /// Redraw a table's header row after a page break
    pub repeat_table_header: bool,

    /// Run the input cleanup rules before classification
    pub clean_input: bool,

    /// Fonts, sizes, spacing and colors of the paginated output
    pub style: PdfStyle,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Enable or disable repeating table headers on new pages.
    pub fn with_repeat_table_header(mut self, repeat: bool) -> Self {
        self.repeat_table_header = repeat;
        self
    }

    /// Enable or disable input cleanup.
    pub fn with_clean_input(mut self, clean: bool) -> Self {
        self.clean_input = clean;
        self
    }

    /// Replace the paginated style.
    pub fn with_style(mut self, style: PdfStyle) -> Self {
        self.style = style;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            page_size: PageSize::A4,
            repeat_table_header: false,
            clean_input: false,
            style: PdfStyle::default(),
        }
    }
}

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// ISO A4 (210 x 297 mm)
    #[default]
    A4,
    /// US Letter (8.5 x 11 in)
    Letter,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
        }
    }

    /// Width and height in twentieths of a point (Word units).
    pub fn twips(self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" | "us-letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{}'", other)),
        }
    }
}
