//! Vertical cursor and page-break decisions.

use super::canvas::Canvas;
use super::style::PdfStyle;

/// Printable area of a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Margin on all sides
    pub margin: f32,
    /// Blocks may not start within this distance of the bottom margin
    pub break_reserve: f32,
}

impl PageGeometry {
    /// Geometry for a page size and style.
    pub fn new(width: f32, height: f32, style: &PdfStyle) -> Self {
        Self {
            width,
            height,
            margin: style.margin,
            break_reserve: style.break_reserve,
        }
    }

    /// Left edge of the printable area.
    pub fn left(&self) -> f32 {
        self.margin
    }

    /// Top edge of the printable area.
    pub fn top(&self) -> f32 {
        self.margin
    }

    /// Bottom edge of the printable area.
    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Width of the printable area.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

/// Current vertical position and page index.
///
/// Owned by a single layout pass; nothing about it is shared between exports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Distance from the top of the page
    pub y: f32,
    /// Index of the page being drawn
    pub page: usize,
}

impl Cursor {
    /// A cursor at the top of the first page.
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            y: geometry.top(),
            page: 0,
        }
    }

    /// Move down by `dy`.
    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Whether `height` more points fit above the bottom margin.
    pub fn fits(&self, height: f32, geometry: &PageGeometry) -> bool {
        self.y + height <= geometry.bottom() + f32::EPSILON
    }

    /// Whether the cursor is at the top of its page.
    pub fn at_top(&self, geometry: &PageGeometry) -> bool {
        (self.y - geometry.top()).abs() < 0.01
    }

    /// Whether the cursor has passed the break threshold near the bottom margin.
    pub fn past_threshold(&self, geometry: &PageGeometry) -> bool {
        self.y > geometry.bottom() - geometry.break_reserve
    }

    /// Start a new page and reset to its top margin.
    pub fn new_page(&mut self, canvas: &mut Canvas, geometry: &PageGeometry) {
        self.page = canvas.add_page();
        self.y = geometry.top();
        log::debug!("Page break: starting page {}", self.page + 1);
    }

    /// Check the threshold before a block; returns whether a new page started.
    pub fn break_before_block(&mut self, canvas: &mut Canvas, geometry: &PageGeometry) -> bool {
        if self.past_threshold(geometry) {
            self.new_page(canvas, geometry);
            return true;
        }
        false
    }

    /// Make room for an unsplittable unit of `height` points.
    ///
    /// A unit taller than a page is drawn from the top of a fresh page and
    /// allowed to overflow; it is never split.
    pub fn ensure_room(
        &mut self,
        height: f32,
        canvas: &mut Canvas,
        geometry: &PageGeometry,
    ) -> bool {
        if self.fits(height, geometry) || self.at_top(geometry) {
            return false;
        }
        self.new_page(canvas, geometry);
        true
    }
}
