//! Multi-line text layout.
//!
//! Backends only ever see single lines. The block is anchored at its
//! bottom-left corner before alignment; `xalign`/`yalign` shift it by a
//! fraction of its width/height (`-0.5` centers, `-1` right/top aligns).

use crate::color::Color;
use crate::font::Font;
use crate::geom::{Point, Rectangle};
use crate::length::Length;

/// Common alignment values for [`TextStyle::xalign`] and [`TextStyle::yalign`].
pub mod align {
    pub const LEFT: f64 = 0.0;
    pub const CENTER: f64 = -0.5;
    pub const RIGHT: f64 = -1.0;
    pub const BOTTOM: f64 = 0.0;
    pub const MIDDLE: f64 = -0.5;
    pub const TOP: f64 = -1.0;
}

/// How text is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font: Font,
    /// Counter-clockwise rotation about the anchor, in radians.
    pub rotation: f64,
    pub xalign: f64,
    pub yalign: f64,
}

/// Lines of `text` with trailing newlines dropped.
pub(crate) fn lines(text: &str) -> Vec<&str> {
    let text = text.trim_end_matches('\n');
    if text.is_empty() { Vec::new() } else { text.split('\n').collect() }
}

impl TextStyle {
    pub fn new(font: Font) -> Self {
        TextStyle {
            color: Color::BLACK,
            font,
            rotation: 0.0,
            xalign: align::LEFT,
            yalign: align::BOTTOM,
        }
    }

    /// Width of the widest line, ignoring rotation.
    pub fn width(&self, text: &str) -> Length {
        lines(text).into_iter().map(|l| self.font.width(l)).fold(Length::ZERO, Length::max)
    }

    /// `ascent + line height × (lines − 1)`, ignoring rotation. Zero for
    /// empty text.
    pub fn height(&self, text: &str) -> Length {
        let n = lines(text).len();
        if n == 0 {
            return Length::ZERO;
        }
        let ext = self.font.extents();
        ext.ascent + ext.height * (n - 1) as f64
    }

    /// Bounds of the drawn text relative to its anchor, rotation included.
    pub fn rectangle(&self, text: &str) -> Rectangle {
        let (w, h) = (self.width(text), self.height(text));
        let descent = self.font.extents().descent;
        let xoff = w * self.xalign;
        let yoff = h * self.yalign - descent;
        let corners = [
            Point::new(xoff, yoff),
            Point::new(xoff, yoff + h + descent),
            Point::new(xoff + w, yoff),
            Point::new(xoff + w, yoff + h + descent),
        ];
        let rotated = corners.map(|p| p.rotate(self.rotation, Point::ORIGIN));
        Rectangle::bounding(rotated).unwrap_or_default()
    }

    /// Baseline origins for each line of `text` anchored at `at`, in the
    /// rotated frame `fill_text` draws in.
    pub(crate) fn layout<'t>(&self, at: Point, text: &'t str) -> Vec<(Point, &'t str)> {
        let lines = lines(text);
        let n = lines.len();
        if n == 0 {
            return Vec::new();
        }
        let (sin, cos) = self.rotation.sin_cos();
        // the anchor, expressed in the rotated frame
        let mut origin = Point::new(at.x * cos + at.y * sin, at.y * cos - at.x * sin);
        origin.y += self.height(text) * self.yalign - self.font.extents().ascent;
        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let dx = self.font.width(line) * self.xalign;
                let dy = self.font.size * (n - i) as f64;
                (Point::new(origin.x + dx, origin.y + dy), line)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::font::testing::FixedFace;

    fn style() -> TextStyle {
        let face = Arc::new(FixedFace::times_like());
        TextStyle::new(Font::from_face("Times-Roman", Length(12.0), face))
    }

    #[test]
    fn trailing_newlines_are_dropped() {
        assert_eq!(lines("a\nb\n\n"), vec!["a", "b"]);
        assert_eq!(lines("a\n\nb"), vec!["a", "", "b"]);
        assert!(lines("\n\n").is_empty());
    }

    #[test]
    fn height_counts_lines() {
        let s = style();
        assert_eq!(s.height(""), Length::ZERO);
        assert_eq!(s.height("A"), Length(10.693359375));
        assert_eq!(s.height("A\nV\n"), Length(10.693359375 + 13.798828125));
        assert_eq!(s.width("A\nAV"), Length(15.78515625));
    }

    #[test]
    fn single_line_baseline() {
        let s = style();
        let laid = s.layout(Point::pt(100.0, 50.0), "AV");
        assert_eq!(laid.len(), 1);
        let (p, line) = laid[0];
        assert_eq!(line, "AV");
        assert_eq!(p.x, Length(100.0));
        // y + 0 - ascent + 1 * size
        assert!((p.y.raw() - (50.0 - 10.693359375 + 12.0)).abs() < 1e-12);
    }

    #[test]
    fn centered_multi_line_layout() {
        let mut s = style();
        s.xalign = align::CENTER;
        s.yalign = align::TOP;
        let laid = s.layout(Point::pt(0.0, 0.0), "A\nAV");
        let h = s.height("A\nAV").raw();
        let asc = 10.693359375;
        assert_eq!(laid[0].0.x, Length(-8.666015625 / 2.0));
        assert_eq!(laid[1].0.x, Length(-15.78515625 / 2.0));
        assert!((laid[0].0.y.raw() - (-h - asc + 24.0)).abs() < 1e-12);
        assert!((laid[1].0.y.raw() - (-h - asc + 12.0)).abs() < 1e-12);
    }

    #[test]
    fn rotated_anchor_moves_into_rotated_frame() {
        let mut s = style();
        s.rotation = std::f64::consts::FRAC_PI_2;
        let (p, _) = s.layout(Point::pt(10.0, 20.0), "A")[0];
        // (x, y) -> (x cos + y sin, y cos - x sin) = (20, -10)
        assert!((p.x.raw() - 20.0).abs() < 1e-9);
        assert!((p.y.raw() - (-10.0 - 10.693359375 + 12.0)).abs() < 1e-9);
    }

    #[test]
    fn rotated_rectangle_swaps_extent() {
        let mut s = style();
        let flat = s.rectangle("AV");
        s.rotation = std::f64::consts::FRAC_PI_2;
        let up = s.rectangle("AV");
        assert!((flat.width().raw() - up.height().raw()).abs() < 1e-9);
        assert!((flat.height().raw() - up.width().raw()).abs() < 1e-9);
    }
}
