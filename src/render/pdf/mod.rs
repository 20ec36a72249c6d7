//! Paginated output.
//!
//! Layout happens on a [`Canvas`] with a single vertical [`Cursor`]; the
//! canvas is then serialized with lopdf. Page breaks are decided before each
//! block and before each line or table row, so they are a pure function of
//! the input and the options.

mod canvas;
mod cursor;
mod metrics;
mod style;
mod table;
mod writer;

pub use canvas::{Canvas, CanvasPage, DrawOp, LinkArea};
pub use cursor::{Cursor, PageGeometry};
pub use metrics::{encode_win_ansi, text_width, wrap_text};
pub use style::{FontFace, LineStyle, PdfStyle, Rgb};
pub use table::GridRenderer;
pub use writer::{write_pdf, PRODUCER};

use crate::error::{Error, Result};
use crate::model::{Run, Table};
use crate::render::sink::{feed, BlockSink, StatsSink};
use crate::render::{prepare_input, ExportOptions, ExportResult, ExportStats};

use metrics::break_word;

/// MIME type of the paginated output.
pub const PDF_MIME: &str = "application/pdf";

/// Underline offset below the baseline and its width.
const UNDERLINE_OFFSET: f32 = 1.5;
const UNDERLINE_WIDTH: f32 = 0.5;

/// Render Markdown to PDF bytes.
pub fn to_pdf(markdown: &str, options: &ExportOptions) -> Result<ExportResult> {
    let (canvas, mut stats) = lay_out(markdown, options)?;
    stats.page_count = canvas.page_count() as u32;
    let bytes = write_pdf(&canvas)?;
    log::debug!(
        "PDF rendered: {} pages, {} link regions, {} bytes",
        canvas.page_count(),
        canvas.link_count(),
        bytes.len()
    );
    Ok(ExportResult::new(bytes, stats, PDF_MIME))
}

/// Lay Markdown out on pages without serializing.
pub fn layout_pdf(markdown: &str, options: &ExportOptions) -> Result<Canvas> {
    lay_out(markdown, options).map(|(canvas, _)| canvas)
}

fn lay_out(markdown: &str, options: &ExportOptions) -> Result<(Canvas, ExportStats)> {
    let input = prepare_input(markdown, options);
    let mut sink = StatsSink::new(PdfSink::new(options)?);
    feed(&input, &mut sink)?;
    let (pdf, stats) = sink.into_parts();
    Ok((pdf.finish(), stats))
}

/// A piece of inline text that is never split across lines.
#[derive(Debug, Clone)]
struct Piece<'r> {
    text: String,
    url: Option<&'r str>,
    space_before: bool,
}

/// A placed piece on the current line.
#[derive(Debug, Clone)]
struct Segment<'r> {
    x: f32,
    width: f32,
    text: String,
    url: Option<&'r str>,
}

/// [`BlockSink`] that lays blocks out on pages.
pub struct PdfSink<'o> {
    options: &'o ExportOptions,
    geometry: PageGeometry,
    canvas: Canvas,
    cursor: Cursor,
}

impl<'o> PdfSink<'o> {
    /// Start a document and draw its title region on the first page.
    pub fn new(options: &'o ExportOptions) -> Result<Self> {
        let (width, height) = options.page_size.dimensions();
        let style = &options.style;
        if style.margin < 0.0 || 2.0 * style.margin >= width.min(height) {
            return Err(Error::InvalidOption(format!(
                "margin {} leaves no printable area on a {}x{} page",
                style.margin, width, height
            )));
        }

        let geometry = PageGeometry::new(width, height, style);
        let mut sink = Self {
            options,
            geometry,
            canvas: Canvas::new(width, height, options.title.as_str()),
            cursor: Cursor::new(&geometry),
        };
        sink.draw_title();
        Ok(sink)
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Finish layout and return the pages.
    pub fn finish(self) -> Canvas {
        self.canvas
    }

    fn style(&self) -> &PdfStyle {
        &self.options.style
    }

    fn draw_title(&mut self) {
        let options = self.options;
        let style = &options.style;
        let left = self.geometry.left();
        let right = left + self.geometry.content_width();

        self.canvas.text(
            0,
            left,
            self.cursor.y + style.title.size,
            options.title.as_str(),
            FontFace::Bold,
            style.title.size,
            style.text_color,
        );
        self.cursor.advance(style.title.step);
        self.canvas.line(
            0,
            left,
            self.cursor.y,
            right,
            self.cursor.y,
            UNDERLINE_WIDTH,
            style.rule_color,
        );
        self.cursor.advance(style.title_gap);
    }

    fn begin_block(&mut self) {
        self.cursor.break_before_block(&mut self.canvas, &self.geometry);
    }

    fn end_block(&mut self) {
        let gap = self.style().block_gap;
        self.cursor.advance(gap);
    }

    /// Flow runs left to right, wrapping between words. Link runs are kept
    /// whole unless they are wider than a full line.
    fn write_runs(&mut self, runs: &[Run], face: FontFace, line: LineStyle) {
        let max_width = self.geometry.content_width();
        let space = text_width(" ", face, line.size);
        let mut current: Vec<Segment> = Vec::new();
        let mut x = 0.0;
        let mut lines_written = 0;

        for piece in pieces(runs, face, line.size, max_width) {
            let width = text_width(&piece.text, face, line.size);
            let gap = if piece.space_before && !current.is_empty() {
                space
            } else {
                0.0
            };

            if !current.is_empty() && x + gap + width > max_width {
                self.write_line(&current, face, line);
                lines_written += 1;
                current.clear();
                x = 0.0;
            }
            let gap = if current.is_empty() { 0.0 } else { gap };

            match current.last_mut() {
                Some(last) if last.url.is_none() && piece.url.is_none() => {
                    if gap > 0.0 {
                        last.text.push(' ');
                    }
                    last.text.push_str(&piece.text);
                    last.width += gap + width;
                }
                _ => current.push(Segment {
                    x: x + gap,
                    width,
                    text: piece.text,
                    url: piece.url,
                }),
            }
            x += gap + width;
        }

        if !current.is_empty() || lines_written == 0 {
            self.write_line(&current, face, line);
        }
    }

    fn write_line(&mut self, segments: &[Segment], face: FontFace, line: LineStyle) {
        self.cursor
            .ensure_room(line.step, &mut self.canvas, &self.geometry);

        let options = self.options;
        let style = &options.style;
        let page = self.cursor.page;
        let top = self.cursor.y;
        let baseline = top + line.size;
        let left = self.geometry.left();

        for segment in segments {
            let x = left + segment.x;
            let color = if segment.url.is_some() {
                style.link_color
            } else {
                style.text_color
            };
            self.canvas.text(
                page,
                x,
                baseline,
                segment.text.as_str(),
                face,
                line.size,
                color,
            );

            if let Some(url) = segment.url {
                let underline = baseline + UNDERLINE_OFFSET;
                self.canvas.line(
                    page,
                    x,
                    underline,
                    x + segment.width,
                    underline,
                    UNDERLINE_WIDTH,
                    color,
                );
                self.canvas.link(page, x, top, segment.width, line.step, url);
            }
        }

        self.cursor.advance(line.step);
    }
}

/// Split runs into unbreakable pieces: words of text runs, whole link labels.
fn pieces(runs: &[Run], face: FontFace, size: f32, max_width: f32) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut space = false;

    for run in runs {
        match run {
            Run::Text { content } => {
                let mut word = String::new();
                for c in content.chars() {
                    if c.is_whitespace() {
                        if !word.is_empty() {
                            let done = std::mem::take(&mut word);
                            push_word(&mut out, &done, space, face, size, max_width);
                        }
                        space = true;
                    } else {
                        word.push(c);
                    }
                }
                if !word.is_empty() {
                    push_word(&mut out, &word, space, face, size, max_width);
                    space = false;
                }
            }
            Run::Link { label, url } => {
                let label = label.trim();
                if label.is_empty() {
                    continue;
                }
                if text_width(label, face, size) <= max_width {
                    out.push(Piece {
                        text: label.to_string(),
                        url: Some(url),
                        space_before: space,
                    });
                } else {
                    for (i, chunk) in break_word(label, face, size, max_width)
                        .into_iter()
                        .enumerate()
                    {
                        out.push(Piece {
                            text: chunk,
                            url: Some(url),
                            space_before: space && i == 0,
                        });
                    }
                }
                space = false;
            }
        }
    }

    out
}

/// Push one word of plain text, breaking it when it is wider than a line.
fn push_word(
    out: &mut Vec<Piece<'_>>,
    word: &str,
    space_before: bool,
    face: FontFace,
    size: f32,
    max_width: f32,
) {
    if text_width(word, face, size) <= max_width {
        out.push(Piece {
            text: word.to_string(),
            url: None,
            space_before,
        });
        return;
    }
    for (i, chunk) in break_word(word, face, size, max_width).into_iter().enumerate() {
        out.push(Piece {
            text: chunk,
            url: None,
            space_before: space_before && i == 0,
        });
    }
}

impl BlockSink for PdfSink<'_> {
    fn emit_heading(&mut self, level: u8, runs: &[Run]) -> Result<()> {
        self.begin_block();
        let line = self.style().heading(level);
        self.write_runs(runs, FontFace::Bold, line);
        self.end_block();
        Ok(())
    }

    fn emit_paragraph(&mut self, runs: &[Run]) -> Result<()> {
        self.begin_block();
        let line = self.style().body;
        self.write_runs(runs, FontFace::Regular, line);
        self.end_block();
        Ok(())
    }

    fn emit_table(&mut self, table: &Table) -> Result<()> {
        self.begin_block();
        let breaks = GridRenderer::new(
            &self.options.style,
            &self.geometry,
            self.options.repeat_table_header,
        )
        .draw(table, &mut self.canvas, &mut self.cursor);
        if breaks > 0 {
            log::debug!(
                "Table with {} rows continued across {} page breaks",
                table.row_count(),
                breaks
            );
        }
        self.end_block();
        Ok(())
    }
}
