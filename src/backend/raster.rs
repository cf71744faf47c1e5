//! Raster output through `tiny-skia`, encoded with `image`.
//!
//! The pixmap starts white. Colors are handed over as straight RGBA8 and
//! premultiplied by tiny-skia; encoding demultiplies again.

use std::io::{Cursor, Write};

use glam::{DAffine2, dvec2};
use image::{DynamicImage, ImageFormat, RgbaImage};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash, Transform};

use crate::canvas::{Canvas, CanvasState, StateStack};
use crate::color::Color;
use crate::errors::{CanvasError, SaveError};
use crate::font::{Font, GlyphId};
use crate::geom::{Point, Rectangle, affine_coefficients};
use crate::length::{Dpi, Length};
use crate::path::{Path, Segment};

/// Image container written by [`RasterCanvas::write_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RasterEncoding {
    #[default]
    Png,
    Jpeg,
    Tiff,
}

impl RasterEncoding {
    fn image_format(self) -> ImageFormat {
        match self {
            RasterEncoding::Png => ImageFormat::Png,
            RasterEncoding::Jpeg => ImageFormat::Jpeg,
            RasterEncoding::Tiff => ImageFormat::Tiff,
        }
    }
}

/// A canvas rendering into a pixel buffer.
pub struct RasterCanvas {
    pixmap: Pixmap,
    dpi: Dpi,
    stack: StateStack,
    /// Points to device pixels, Y flipped to the top-left origin.
    base: DAffine2,
    encoding: RasterEncoding,
}

impl std::fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("dpi", &self.dpi)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl RasterCanvas {
    /// A white canvas of `width × height` at `dpi`; the pixel size is rounded
    /// up.
    pub fn new(width: Length, height: Length, dpi: f64) -> Result<Self, CanvasError> {
        let dpi = Dpi::try_new(dpi)?;
        let invalid = || CanvasError::InvalidSize { width: width.raw(), height: height.raw() };
        let (w, h) = (width.dots(dpi).ceil(), height.dots(dpi).ceil());
        if !(w >= 1.0 && h >= 1.0 && w <= f64::from(u32::MAX) && h <= f64::from(u32::MAX)) {
            return Err(invalid());
        }
        let mut pixmap = Pixmap::new(w as u32, h as u32).ok_or_else(invalid)?;
        pixmap.fill(tiny_skia::Color::WHITE);
        let s = dpi.dots_per_point();
        Ok(RasterCanvas {
            pixmap,
            dpi,
            stack: StateStack::new(),
            base: DAffine2::from_cols_array(&[s, 0.0, 0.0, -s, 0.0, h]),
            encoding: RasterEncoding::default(),
        })
    }

    pub fn with_encoding(mut self, encoding: RasterEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn state(&self) -> &CanvasState {
        self.stack.top()
    }

    pub fn width_px(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height_px(&self) -> u32 {
        self.pixmap.height()
    }

    /// The pixels, demultiplied, row 0 at the top.
    pub fn to_image(&self) -> RgbaImage {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let data: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        // the buffer length always matches w × h × 4
        RgbaImage::from_raw(w, h, data).unwrap_or_else(|| RgbaImage::new(w, h))
    }

    pub fn write_to<W: Write + ?Sized>(self, w: &mut W) -> Result<(), SaveError> {
        let image = self.to_image();
        let dynamic = match self.encoding {
            // no alpha channel in JPEG
            RasterEncoding::Jpeg => {
                DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8())
            }
            _ => DynamicImage::ImageRgba8(image),
        };
        let mut buf = Cursor::new(Vec::new());
        dynamic.write_to(&mut buf, self.encoding.image_format())?;
        w.write_all(buf.get_ref())?;
        Ok(())
    }

    fn transform(&self, extra: DAffine2) -> Transform {
        let [a, b, c, d, e, f] = affine_coefficients(&(self.base * self.state().transform * extra));
        Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
    }

    fn paint(&self) -> Paint<'static> {
        let Color { r, g, b, a } = self.state().color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn stroke_style(&self) -> Stroke {
        let state = self.state();
        let mut stroke = Stroke { width: state.line_width.raw() as f32, ..Stroke::default() };
        if !state.dash.is_empty() {
            let mut dash: Vec<f32> = state.dash.iter().map(|l| l.raw() as f32).collect();
            if dash.len() % 2 == 1 {
                dash.extend_from_within(..);
            }
            stroke.dash = StrokeDash::new(dash, state.dash_offset.raw() as f32);
        }
        stroke
    }
}

fn skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for seg in path.segments() {
        match seg {
            Segment::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            Segment::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            Segment::CubicTo(c1, c2, p) => {
                pb.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    p.x as f32,
                    p.y as f32,
                )
            }
            Segment::Close => pb.close(),
        }
    }
    pb.finish()
}

impl Canvas for RasterCanvas {
    fn set_line_width(&mut self, width: Length) {
        self.stack.set_line_width(width);
    }

    fn set_line_dash(&mut self, pattern: &[Length], offset: Length) {
        self.stack.set_line_dash(pattern, offset);
    }

    fn set_color(&mut self, color: Option<Color>) {
        self.stack.set_color(color);
    }

    fn rotate(&mut self, angle: f64) {
        self.stack.rotate(angle);
    }

    fn translate(&mut self, offset: Point) {
        self.stack.translate(offset);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.stack.scale(sx, sy);
    }

    fn push(&mut self) {
        self.stack.push();
    }

    fn pop(&mut self) {
        self.stack.pop();
    }

    fn stroke(&mut self, path: &Path) {
        if !self.state().strokes() {
            return;
        }
        let Some(skia) = skia_path(path) else { return };
        let (paint, stroke) = (self.paint(), self.stroke_style());
        let transform = self.transform(DAffine2::IDENTITY);
        self.pixmap.stroke_path(&skia, &paint, &stroke, transform, None);
    }

    fn fill(&mut self, path: &Path) {
        let Some(skia) = skia_path(path) else { return };
        let (paint, transform) = (self.paint(), self.transform(DAffine2::IDENTITY));
        self.pixmap.fill_path(&skia, &paint, FillRule::Winding, transform, None);
    }

    /// Glyph outlines from the font's face, advanced with kerning.
    fn fill_string(&mut self, font: &Font, at: Point, text: &str) {
        self.stack.set_font(font);
        let face = font.face().clone();
        let scale = font.units_to_points();
        let paint = self.paint();
        let mut pen = 0i64;
        let mut prev: Option<GlyphId> = None;
        for glyph in font.glyphs(text) {
            if let Some(prev) = prev {
                pen += i64::from(face.kerning(prev, glyph));
            }
            let outline = face.outline(glyph).and_then(|p| skia_path(&p));
            if let Some(outline) = outline {
                let offset = at.to_dvec2() + dvec2(pen as f64 * scale, 0.0);
                let placement =
                    DAffine2::from_translation(offset) * DAffine2::from_scale(dvec2(scale, scale));
                let transform = self.transform(placement);
                self.pixmap.fill_path(&outline, &paint, FillRule::Winding, transform, None);
            }
            pen += i64::from(face.glyph_advance(glyph));
            prev = Some(glyph);
        }
    }

    fn draw_image(&mut self, rect: Rectangle, image: &RgbaImage) {
        let (w, h) = image.dimensions();
        let Some(size) = tiny_skia::IntSize::from_wh(w, h) else { return };
        let premultiplied: Vec<u8> = image
            .pixels()
            .flat_map(|p| {
                let [r, g, b, a] = p.0;
                let m = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
                [m(r), m(g), m(b), a]
            })
            .collect();
        let Some(src) = Pixmap::from_vec(premultiplied, size) else { return };
        // image rows run top-down
        let placement = DAffine2::from_translation(dvec2(rect.min.x.raw(), rect.max().y.raw()))
            * DAffine2::from_scale(dvec2(
                rect.width().raw() / f64::from(w),
                -rect.height().raw() / f64::from(h),
            ));
        let transform = self.transform(placement);
        self.pixmap.draw_pixmap(0, 0, src.as_ref(), &PixmapPaint::default(), transform, None);
    }

    fn dpi(&self) -> f64 {
        self.dpi.get()
    }
}
