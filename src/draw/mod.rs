//! Drawing helpers on top of [`Canvas`].
//!
//! A [`DrawArea`] pairs a canvas with the rectangle being drawn into. Plot
//! components receive one, crop it, and map normalized coordinates into it.

mod glyph;
mod style;
mod text;

pub use glyph::{GlyphShape, GlyphStyle};
pub use style::LineStyle;
pub use text::{TextStyle, align};

use crate::canvas::Canvas;
use crate::clip;
use crate::color::Color;
use crate::geom::{Point, Rectangle};
use crate::length::Length;
use crate::path::Path;

/// Tolerance for the containment tests.
const SLOP: f64 = 1e-8;

/// A canvas together with the rectangle of it being drawn into.
pub struct DrawArea<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub rect: Rectangle,
}

impl<'a> DrawArea<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, rect: Rectangle) -> Self {
        DrawArea { canvas, rect }
    }

    /// The same canvas with another rectangle.
    pub fn with_rect(&mut self, rect: Rectangle) -> DrawArea<'_> {
        DrawArea { canvas: &mut *self.canvas, rect }
    }

    /// Move the corners inward: `min += (left, bottom)`, `max += (right, top)`.
    /// Shrinking the top-right takes negative values.
    pub fn crop(
        &mut self,
        left: Length,
        bottom: Length,
        right: Length,
        top: Length,
    ) -> DrawArea<'_> {
        let min = Point::new(self.rect.min.x + left, self.rect.min.y + bottom);
        let max = self.rect.max();
        let max = Point::new(max.x + right, max.y + top);
        self.with_rect(Rectangle::from_corners(min, max))
    }

    /// Canvas X for a normalized `x` in `[0, 1]`.
    pub fn x(&self, norm: f64) -> Length {
        self.rect.min.x + self.rect.width() * norm
    }

    /// Canvas Y for a normalized `y` in `[0, 1]`.
    pub fn y(&self, norm: f64) -> Length {
        self.rect.min.y + self.rect.height() * norm
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    pub fn contains_x(&self, x: Length) -> bool {
        let max = self.rect.max().x;
        self.rect.min.x.raw() <= x.raw() + SLOP && x.raw() <= max.raw() + SLOP
    }

    pub fn contains_y(&self, y: Length) -> bool {
        let max = self.rect.max().y;
        self.rect.min.y.raw() <= y.raw() + SLOP && y.raw() <= max.raw() + SLOP
    }

    pub fn contains(&self, p: Point) -> bool {
        self.contains_x(p.x) && self.contains_y(p.y)
    }

    pub fn set_line_style(&mut self, style: &LineStyle) {
        self.canvas.set_color(Some(style.color));
        self.canvas.set_line_width(style.width);
        self.canvas.set_line_dash(&style.dashes, style.dash_offset);
    }

    /// Stroke each polyline. Invisible styles and empty lines draw nothing.
    pub fn stroke_lines(&mut self, style: &LineStyle, lines: &[Vec<Point>]) {
        if lines.is_empty() || !style.is_visible() {
            return;
        }
        self.set_line_style(style);
        for line in lines.iter().filter(|l| !l.is_empty()) {
            self.canvas.stroke(&Path::polyline(line));
        }
    }

    /// Stroke the segment from `(x1, y1)` to `(x2, y2)`.
    pub fn stroke_line2(
        &mut self,
        style: &LineStyle,
        x1: Length,
        y1: Length,
        x2: Length,
        y2: Length,
    ) {
        self.stroke_lines(style, &[vec![Point::new(x1, y1), Point::new(x2, y2)]]);
    }

    /// Fill the polygon through `points` with `color`.
    pub fn fill_polygon(&mut self, color: Color, points: &[Point]) {
        if points.is_empty() {
            return;
        }
        self.canvas.set_color(Some(color));
        self.canvas.fill(&Path::polygon(points));
    }

    /// Split `lines` where they leave the area horizontally.
    pub fn clip_lines_x(&self, lines: &[Vec<Point>]) -> Vec<Vec<Point>> {
        clip::clip_lines_x(&self.rect, lines)
    }

    /// Split `lines` where they leave the area vertically.
    pub fn clip_lines_y(&self, lines: &[Vec<Point>]) -> Vec<Vec<Point>> {
        clip::clip_lines_y(&self.rect, lines)
    }

    pub fn clip_lines_xy(&self, lines: &[Vec<Point>]) -> Vec<Vec<Point>> {
        clip::clip_lines_xy(&self.rect, lines)
    }

    /// Draw possibly multi-line `text` anchored at `at`.
    pub fn fill_text(&mut self, style: &TextStyle, at: Point, text: &str) {
        let laid = style.layout(at, text);
        if laid.is_empty() {
            return;
        }
        self.canvas.set_color(Some(style.color));
        let rotated = style.rotation != 0.0;
        if rotated {
            self.canvas.push();
            self.canvas.rotate(style.rotation);
        }
        for (origin, line) in laid {
            if !line.is_empty() {
                self.canvas.fill_string(&style.font, origin, line);
            }
        }
        if rotated {
            self.canvas.pop();
        }
    }

    /// Draw a point marker centered on `at`, unless `at` is outside the area.
    pub fn draw_glyph(&mut self, style: &GlyphStyle, at: Point) {
        if !self.contains(at) {
            return;
        }
        style.shape.draw(&mut *self.canvas, style, at);
    }
}
