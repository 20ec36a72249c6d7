//! Grid renderer for tables.
//!
//! Columns share the printable width equally. Rows are the unit of
//! pagination: a row that does not fit below the cursor moves to the next
//! page as a whole, never leaving part of its cells behind.

use crate::model::{Cell, Table};

use super::canvas::Canvas;
use super::cursor::{Cursor, PageGeometry};
use super::metrics::wrap_text;
use super::style::{FontFace, PdfStyle};

/// Grid line width.
const RULE_WIDTH: f32 = 0.5;

/// A cell with its text already wrapped to the column.
#[derive(Debug, Clone)]
struct LaidOutCell {
    lines: Vec<String>,
    url: Option<String>,
}

/// A row ready to draw.
#[derive(Debug, Clone)]
struct LaidOutRow {
    cells: Vec<LaidOutCell>,
    height: f32,
    header: bool,
}

/// Draws one table at the cursor.
pub struct GridRenderer<'a> {
    style: &'a PdfStyle,
    geometry: &'a PageGeometry,
    repeat_header: bool,
}

impl<'a> GridRenderer<'a> {
    /// Create a renderer for the given style and page geometry.
    pub fn new(style: &'a PdfStyle, geometry: &'a PageGeometry, repeat_header: bool) -> Self {
        Self {
            style,
            geometry,
            repeat_header,
        }
    }

    /// Width of each column for a table with `columns` columns.
    pub fn column_width(&self, columns: usize) -> f32 {
        self.geometry.content_width() / columns.max(1) as f32
    }

    /// Draw `table` and leave the cursor below its last row.
    ///
    /// Returns the number of page breaks taken inside the table.
    pub fn draw(&self, table: &Table, canvas: &mut Canvas, cursor: &mut Cursor) -> usize {
        let columns = table.column_count();
        if columns == 0 {
            return 0;
        }
        if table.is_ragged() {
            log::debug!(
                "Ragged table: header has {} cells, padding rows to {}",
                table.header.len(),
                columns
            );
        }

        let header = self.lay_out_row(&table.header, columns, true);
        let mut breaks = 0;

        if cursor.ensure_room(header.height, canvas, self.geometry) {
            breaks += 1;
        }
        self.draw_row(&header, canvas, cursor);

        for row in &table.rows {
            let row = self.lay_out_row(row, columns, false);
            if cursor.ensure_room(row.height, canvas, self.geometry) {
                breaks += 1;
                if self.repeat_header {
                    self.draw_row(&header, canvas, cursor);
                }
            }
            self.draw_row(&row, canvas, cursor);
        }

        breaks
    }

    fn lay_out_row(&self, cells: &[Cell], columns: usize, header: bool) -> LaidOutRow {
        let face = if header { FontFace::Bold } else { FontFace::Regular };
        let inner = self.column_width(columns) - 2.0 * self.style.cell_padding;
        let size = self.style.cell.size;

        let empty = Cell::empty();
        let cells: Vec<LaidOutCell> = (0..columns)
            .map(|i| {
                let cell = cells.get(i).unwrap_or(&empty);
                let url = cell.whole_link().map(|(_, url)| url.to_string());
                LaidOutCell {
                    lines: wrap_text(&cell.plain_text(), face, size, inner),
                    url,
                }
            })
            .collect();

        let line_count = cells.iter().map(|c| c.lines.len()).max().unwrap_or(1);
        let height = line_count as f32 * self.style.cell.step + 2.0 * self.style.cell_padding;

        LaidOutRow {
            cells,
            height,
            header,
        }
    }

    fn draw_row(&self, row: &LaidOutRow, canvas: &mut Canvas, cursor: &mut Cursor) {
        let style = self.style;
        let width = self.column_width(row.cells.len());
        let top = cursor.y;
        let face = if row.header { FontFace::Bold } else { FontFace::Regular };

        for (i, cell) in row.cells.iter().enumerate() {
            let x = self.geometry.left() + i as f32 * width;
            if row.header {
                canvas.rect(cursor.page, x, top, width, row.height, Some(style.header_fill), None);
            }

            let color = if cell.url.is_some() {
                style.link_color
            } else {
                style.text_color
            };
            for (k, line) in cell.lines.iter().enumerate() {
                let baseline =
                    top + style.cell_padding + k as f32 * style.cell.step + style.cell.size;
                canvas.text(
                    cursor.page,
                    x + style.cell_padding,
                    baseline,
                    line.as_str(),
                    face,
                    style.cell.size,
                    color,
                );
            }

            if let Some(url) = &cell.url {
                canvas.link(cursor.page, x, top, width, row.height, url.as_str());
            }
        }

        self.draw_grid(row, canvas, cursor.page, top, width);
        cursor.advance(row.height);
    }

    fn draw_grid(&self, row: &LaidOutRow, canvas: &mut Canvas, page: usize, top: f32, width: f32) {
        let left = self.geometry.left();
        let right = left + width * row.cells.len() as f32;
        let bottom = top + row.height;
        let color = self.style.rule_color;

        canvas.line(page, left, top, right, top, RULE_WIDTH, color);
        canvas.line(page, left, bottom, right, bottom, RULE_WIDTH, color);
        for i in 0..=row.cells.len() {
            let x = left + i as f32 * width;
            canvas.line(page, x, top, x, bottom, RULE_WIDTH, color);
        }
    }
}
