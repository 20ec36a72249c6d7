//! Page model produced by the layout pass.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and `y` growing downwards. The writer flips them when serializing.

use super::style::{FontFace, Rgb};

/// A primitive drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text drawn with its baseline at `y`.
    Text {
        x: f32,
        y: f32,
        text: String,
        face: FontFace,
        size: f32,
        color: Rgb,
    },
    /// A straight line.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
    /// A rectangle whose top-left corner is at (`x`, `y`).
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
}

/// A clickable region pointing at an external URL.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkArea {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
    /// Link target
    pub url: String,
}

impl LinkArea {
    /// Check whether a point lies inside the region.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

/// One laid-out page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasPage {
    /// Drawing operations in painting order
    pub ops: Vec<DrawOp>,
    /// Clickable link regions
    pub links: Vec<LinkArea>,
}

impl CanvasPage {
    /// Text of every text operation on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Check if nothing was drawn on the page.
    pub fn is_blank(&self) -> bool {
        self.ops.is_empty() && self.links.is_empty()
    }
}

/// A sequence of fixed-size pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Document title
    pub title: String,
    pages: Vec<CanvasPage>,
}

impl Canvas {
    /// Create a canvas with one empty page.
    pub fn new(width: f32, height: f32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            pages: vec![CanvasPage::default()],
        }
    }

    /// All pages in order.
    pub fn pages(&self) -> &[CanvasPage] {
        &self.pages
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append an empty page and return its index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(CanvasPage::default());
        self.pages.len() - 1
    }

    /// All link regions with their page index.
    pub fn links(&self) -> impl Iterator<Item = (usize, &LinkArea)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, p)| p.links.iter().map(move |l| (i, l)))
    }

    /// Total number of link regions.
    pub fn link_count(&self) -> usize {
        self.pages.iter().map(|p| p.links.len()).sum()
    }

    fn page_mut(&mut self, page: usize) -> &mut CanvasPage {
        if page >= self.pages.len() {
            self.pages.resize_with(page + 1, CanvasPage::default);
        }
        &mut self.pages[page]
    }

    /// Draw text with its baseline at `y`.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        page: usize,
        x: f32,
        y: f32,
        text: impl Into<String>,
        face: FontFace,
        size: f32,
        color: Rgb,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.page_mut(page).ops.push(DrawOp::Text {
            x,
            y,
            text,
            face,
            size,
            color,
        });
    }

    /// Draw a line.
    #[allow(clippy::too_many_arguments)]
    pub fn line(&mut self, page: usize, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Rgb) {
        self.page_mut(page).ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        });
    }

    /// Draw a rectangle.
    #[allow(clippy::too_many_arguments)]
    pub fn rect(
        &mut self,
        page: usize,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    ) {
        self.page_mut(page).ops.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            fill,
            stroke,
        });
    }

    /// Register a clickable region.
    pub fn link(&mut self, page: usize, x: f32, y: f32, w: f32, h: f32, url: impl Into<String>) {
        self.page_mut(page).links.push(LinkArea {
            x,
            y,
            w,
            h,
            url: url.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_has_one_page() {
        let canvas = Canvas::new(595.0, 842.0, "T");
        assert_eq!(canvas.page_count(), 1);
        assert!(canvas.pages()[0].is_blank());
    }

    #[test]
    fn test_ops_land_on_their_page() {
        let mut canvas = Canvas::new(595.0, 842.0, "T");
        let second = canvas.add_page();
        canvas.text(second, 10.0, 20.0, "hi", FontFace::Regular, 11.0, Rgb::BLACK);
        canvas.text(0, 10.0, 20.0, "", FontFace::Regular, 11.0, Rgb::BLACK);
        canvas.link(second, 10.0, 10.0, 30.0, 12.0, "http://x");

        assert!(canvas.pages()[0].is_blank());
        assert_eq!(canvas.pages()[1].texts().collect::<Vec<_>>(), vec!["hi"]);
        let links: Vec<_> = canvas.links().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].0, 1);
        assert!(links[0].1.contains(20.0, 15.0));
        assert!(!links[0].1.contains(50.0, 15.0));
    }
}
