//! Point markers.

use std::f64::consts::{FRAC_PI_4, FRAC_PI_6};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::defaults;
use crate::font::Font;
use crate::geom::{Point, Rectangle};
use crate::length::Length;
use crate::path::Path;

use super::text::{TextStyle, align};

/// Width of the outline for the stroked shapes.
const OUTLINE_WIDTH: Length = Length::points(0.5);

/// Shape of a point marker.
#[derive(Clone, Debug, PartialEq)]
pub enum GlyphShape {
    /// Filled circle.
    Circle,
    /// Circle outline.
    Ring,
    /// Square outline.
    Square,
    /// Filled square.
    Box,
    /// Triangle outline, apex up.
    Triangle,
    /// Filled triangle, apex up.
    Pyramid,
    /// Diagonal cross.
    Cross,
    /// Upright cross.
    Plus,
    /// A single character drawn with `font` at twice the radius.
    Letter { ch: char, font: Font },
}

/// How a point marker is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphStyle {
    pub color: Color,
    pub radius: Length,
    pub shape: GlyphShape,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        GlyphStyle { color: Color::BLACK, radius: defaults::GLYPH_RADIUS, shape: GlyphShape::Ring }
    }
}

impl GlyphStyle {
    pub fn new(shape: GlyphShape) -> Self {
        GlyphStyle { shape, ..Self::default() }
    }

    /// Bounds of the marker relative to its center.
    pub fn rectangle(&self) -> Rectangle {
        let r = self.radius;
        Rectangle::new(Point::new(-r, -r), Point::new(r * 2.0, r * 2.0))
    }
}

fn square(at: Point, half: Length) -> Path {
    Path::polygon(&[
        Point::new(at.x - half, at.y - half),
        Point::new(at.x + half, at.y - half),
        Point::new(at.x + half, at.y + half),
        Point::new(at.x - half, at.y + half),
    ])
}

fn triangle(at: Point, r: Length) -> Path {
    let (sin, cos) = FRAC_PI_6.sin_cos();
    Path::polygon(&[
        Point::new(at.x, at.y + r),
        Point::new(at.x - r * cos, at.y - r * sin),
        Point::new(at.x + r * cos, at.y - r * sin),
    ])
}

impl GlyphShape {
    /// Draw the marker centered on `at` with the current transform.
    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, style: &GlyphStyle, at: Point) {
        let r = style.radius;
        canvas.set_color(Some(style.color));
        match self {
            GlyphShape::Circle => canvas.fill(&Path::circle(at, r)),
            GlyphShape::Ring => {
                canvas.set_line_width(OUTLINE_WIDTH);
                canvas.set_line_dash(&[], Length::ZERO);
                canvas.stroke(&Path::circle(at, r));
            }
            GlyphShape::Square | GlyphShape::Box => {
                // corners halfway between the inscribed and circumscribed squares
                let cos = FRAC_PI_4.cos();
                let half = (r - r * cos) / 2.0 + r * cos;
                if *self == GlyphShape::Box {
                    canvas.fill(&square(at, half));
                } else {
                    canvas.set_line_width(OUTLINE_WIDTH);
                    canvas.set_line_dash(&[], Length::ZERO);
                    canvas.stroke(&square(at, half));
                }
            }
            GlyphShape::Triangle | GlyphShape::Pyramid => {
                let r = r + (r - r * FRAC_PI_6.sin()) / 2.0;
                if *self == GlyphShape::Pyramid {
                    canvas.fill(&triangle(at, r));
                } else {
                    canvas.set_line_width(OUTLINE_WIDTH);
                    canvas.set_line_dash(&[], Length::ZERO);
                    canvas.stroke(&triangle(at, r));
                }
            }
            GlyphShape::Cross | GlyphShape::Plus => {
                let (dx, dy) = if *self == GlyphShape::Cross {
                    let d = r * FRAC_PI_4.cos();
                    ((d, d), (d, -d))
                } else {
                    ((r, Length::ZERO), (Length::ZERO, r))
                };
                canvas.set_line_width(OUTLINE_WIDTH);
                canvas.set_line_dash(&[], Length::ZERO);
                for (x, y) in [dx, dy] {
                    let line = Path::polyline(&[
                        Point::new(at.x - x, at.y - y),
                        Point::new(at.x + x, at.y + y),
                    ]);
                    canvas.stroke(&line);
                }
            }
            GlyphShape::Letter { ch, font } => {
                let mut text = TextStyle::new(font.with_size(r * 2.0));
                text.color = style.color;
                text.xalign = align::CENTER;
                text.yalign = align::MIDDLE;
                let mut buf = [0u8; 4];
                for (origin, line) in text.layout(at, ch.encode_utf8(&mut buf)) {
                    canvas.fill_string(&text.font, origin, line);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::canvas::{CanvasOp, Recorder};
    use crate::font::testing::FixedFace;

    fn ops(shape: GlyphShape) -> Vec<CanvasOp> {
        let mut rec = Recorder::new();
        let style = GlyphStyle { color: Color::rgb(200, 0, 0), radius: Length(4.0), shape };
        style.shape.draw(&mut rec, &style, Point::pt(10.0, 10.0));
        rec.actions().iter().map(|a| a.op.clone()).collect()
    }

    #[test]
    fn filled_shapes_fill() {
        for shape in [GlyphShape::Circle, GlyphShape::Box, GlyphShape::Pyramid] {
            let ops = ops(shape);
            assert_eq!(ops[0], CanvasOp::SetColor(Some(Color::rgb(200, 0, 0))));
            assert!(matches!(ops.last(), Some(CanvasOp::Fill(_))));
        }
    }

    #[test]
    fn outlined_shapes_stroke_thin() {
        for shape in [GlyphShape::Ring, GlyphShape::Square, GlyphShape::Triangle] {
            let ops = ops(shape);
            assert!(ops.contains(&CanvasOp::SetLineWidth(OUTLINE_WIDTH)));
            assert!(matches!(ops.last(), Some(CanvasOp::Stroke(_))));
        }
    }

    #[test]
    fn crosses_are_two_strokes() {
        for shape in [GlyphShape::Cross, GlyphShape::Plus] {
            let strokes =
                ops(shape).into_iter().filter(|op| matches!(op, CanvasOp::Stroke(_))).count();
            assert_eq!(strokes, 2);
        }
    }

    #[test]
    fn letter_is_centered_text() {
        let font = Font::from_face("Times-Roman", Length(12.0), Arc::new(FixedFace::times_like()));
        let ops = ops(GlyphShape::Letter { ch: 'A', font });
        let Some(CanvasOp::FillString { font, at, text }) = ops.last() else {
            panic!("expected text, got {ops:?}");
        };
        assert_eq!(text, "A");
        assert_eq!(font.size, Length(8.0));
        // half of the 8pt advance of 'A' to the left
        assert!((at.x.raw() - (10.0 - 1479.0 * 8.0 / 2048.0 / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn glyph_rectangle_is_centered() {
        let r = GlyphStyle::default().rectangle();
        assert_eq!(r.min, Point::pt(-2.5, -2.5));
        assert_eq!(r.max(), Point::pt(2.5, 2.5));
    }
}
