//! Fonts, sizes and colors of the paginated output.

/// An RGB color with components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    /// Black.
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
}

/// The two standard faces the output uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
}

impl FontFace {
    /// Resource name of the face in the page resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    /// PostScript name of the standard font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }
}

/// Font size and line advance for one kind of text line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Font size in points
    pub size: f32,
    /// Vertical advance per line in points
    pub step: f32,
}

impl LineStyle {
    /// Create a line style.
    pub const fn new(size: f32, step: f32) -> Self {
        Self { size, step }
    }
}

/// Layout constants of the paginated output. All lengths are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStyle {
    /// Margin on all four sides
    pub margin: f32,
    /// Title in the header region of the first page
    pub title: LineStyle,
    /// Space between the title rule and the first block
    pub title_gap: f32,
    /// Heading levels 1-4
    pub headings: [LineStyle; 4],
    /// Paragraph text
    pub body: LineStyle,
    /// Table cell text
    pub cell: LineStyle,
    /// Padding inside table cells
    pub cell_padding: f32,
    /// Extra space after every block
    pub block_gap: f32,
    /// A block starting closer than this to the bottom margin moves to the next page
    pub break_reserve: f32,
    /// Regular text color
    pub text_color: Rgb,
    /// Link text color
    pub link_color: Rgb,
    /// Table header background
    pub header_fill: Rgb,
    /// Table grid lines and the title rule
    pub rule_color: Rgb,
}

impl PdfStyle {
    /// Line style of a heading level; levels past 4 use level 4.
    pub fn heading(&self, level: u8) -> LineStyle {
        let index = usize::from(level.clamp(1, 4)) - 1;
        self.headings[index]
    }
}

impl Default for PdfStyle {
    fn default() -> Self {
        Self {
            margin: 50.0,
            title: LineStyle::new(18.0, 26.0),
            title_gap: 18.0,
            headings: [
                LineStyle::new(16.0, 24.0),
                LineStyle::new(14.0, 20.0),
                LineStyle::new(12.5, 18.0),
                LineStyle::new(11.5, 16.0),
            ],
            body: LineStyle::new(11.0, 15.0),
            cell: LineStyle::new(10.0, 13.0),
            cell_padding: 5.0,
            block_gap: 4.0,
            break_reserve: 30.0,
            text_color: Rgb::BLACK,
            link_color: Rgb(0.02, 0.27, 0.75),
            header_fill: Rgb(0.9, 0.9, 0.9),
            rule_color: Rgb(0.6, 0.6, 0.6),
        }
    }
}
