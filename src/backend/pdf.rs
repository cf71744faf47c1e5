//! PDF output through `pdf-writer`.
//!
//! Each drawing operation is wrapped in `q … Q` with the full current
//! transform, color and line settings, so no graphics state leaks between
//! operations. Text uses the base-14 fonts named by the PostScript alias
//! table, falling back to Helvetica for faces without one.

use std::io::Write;

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use super::check_size;
use crate::canvas::{Canvas, CanvasState, StateStack};
use crate::color::Color;
use crate::errors::{CanvasError, SaveError};
use crate::font::{Font, postscript_name};
use crate::geom::{Point, Rectangle, affine_coefficients};
use crate::length::Length;
use crate::path::{Path, Segment};

const FALLBACK_FONT: &str = "Helvetica";

/// A canvas producing a single-page PDF document.
pub struct PdfCanvas {
    width: Length,
    height: Length,
    stack: StateStack,
    content: Content,
    /// Base-14 font names; index `i` is resource `/F{i}`.
    fonts: Vec<&'static str>,
    /// Opacities in use; index `i` is resource `/G{i}`.
    alphas: Vec<u8>,
    /// Images in use; index `i` is resource `/Im{i}`.
    images: Vec<image::RgbaImage>,
}

impl std::fmt::Debug for PdfCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fonts", &self.fonts)
            .field("alphas", &self.alphas)
            .field("images", &self.images.len())
            .finish_non_exhaustive()
    }
}

fn f32s(m: [f64; 6]) -> [f32; 6] {
    m.map(|v| v as f32)
}

/// Latin-1 bytes for WinAnsi text, `?` for anything beyond.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?')).collect()
}

impl PdfCanvas {
    pub fn new(width: Length, height: Length) -> Result<Self, CanvasError> {
        check_size(width, height)?;
        Ok(PdfCanvas {
            width,
            height,
            stack: StateStack::new(),
            content: Content::new(),
            fonts: Vec::new(),
            alphas: Vec::new(),
            images: Vec::new(),
        })
    }

    pub fn state(&self) -> &CanvasState {
        self.stack.top()
    }

    fn font_resource(&mut self, font: &Font) -> String {
        let base = postscript_name(&font.name).unwrap_or(FALLBACK_FONT);
        let index = match self.fonts.iter().position(|&f| f == base) {
            Some(i) => i,
            None => {
                self.fonts.push(base);
                self.fonts.len() - 1
            }
        };
        format!("F{index}")
    }

    fn alpha_resource(&mut self, alpha: u8) -> String {
        let index = match self.alphas.iter().position(|&a| a == alpha) {
            Some(i) => i,
            None => {
                self.alphas.push(alpha);
                self.alphas.len() - 1
            }
        };
        format!("G{index}")
    }

    /// Open a `q` block with the current transform and color.
    fn begin(&mut self, stroking: bool) {
        let state = self.stack.top().clone();
        self.content.save_state();
        self.content.transform(f32s(affine_coefficients(&state.transform)));
        let [r, g, b] = state.color.unit_rgb().map(|v| v as f32);
        if stroking {
            self.content.set_stroke_rgb(r, g, b);
        } else {
            self.content.set_fill_rgb(r, g, b);
        }
        if !state.color.is_opaque() {
            let gs = self.alpha_resource(state.color.a);
            self.content.set_parameters(Name(gs.as_bytes()));
        }
    }

    fn path(&mut self, path: &Path) {
        for seg in path.segments() {
            match seg {
                Segment::MoveTo(p) => {
                    self.content.move_to(p.x as f32, p.y as f32);
                }
                Segment::LineTo(p) => {
                    self.content.line_to(p.x as f32, p.y as f32);
                }
                Segment::CubicTo(c1, c2, p) => {
                    self.content.cubic_to(
                        c1.x as f32,
                        c1.y as f32,
                        c2.x as f32,
                        c2.y as f32,
                        p.x as f32,
                        p.y as f32,
                    );
                }
                Segment::Close => {
                    self.content.close_path();
                }
            }
        }
    }

    /// Serialize the finished document.
    pub fn to_pdf(self) -> Vec<u8> {
        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };
        let catalog_id = alloc();
        let page_tree_id = alloc();
        let page_id = alloc();
        let content_id = alloc();
        let font_ids: Vec<Ref> = self.fonts.iter().map(|_| alloc()).collect();
        let gs_ids: Vec<Ref> = self.alphas.iter().map(|_| alloc()).collect();
        let image_ids: Vec<(Ref, Ref)> = self.images.iter().map(|_| (alloc(), alloc())).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, self.width.raw() as f32, self.height.raw() as f32));
        page.parent(page_tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for (i, id) in font_ids.iter().enumerate() {
                fonts.pair(Name(format!("F{i}").as_bytes()), *id);
            }
        }
        {
            let mut states = resources.ext_g_states();
            for (i, id) in gs_ids.iter().enumerate() {
                states.pair(Name(format!("G{i}").as_bytes()), *id);
            }
        }
        {
            let mut objects = resources.x_objects();
            for (i, (id, _)) in image_ids.iter().enumerate() {
                objects.pair(Name(format!("Im{i}").as_bytes()), *id);
            }
        }
        resources.finish();
        page.finish();

        let data = self.content.finish();
        pdf.stream(content_id, &data);

        for (name, id) in self.fonts.iter().zip(&font_ids) {
            pdf.type1_font(*id)
                .base_font(Name(name.as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }
        for (alpha, id) in self.alphas.iter().zip(&gs_ids) {
            let a = f32::from(*alpha) / 255.0;
            pdf.ext_graphics(*id).non_stroking_alpha(a).stroking_alpha(a);
        }
        for (img, (id, mask_id)) in self.images.iter().zip(&image_ids) {
            let (w, h) = (img.width() as i32, img.height() as i32);
            let rgb: Vec<u8> = img.pixels().flat_map(|p| [p[0], p[1], p[2]]).collect();
            let alpha: Vec<u8> = img.pixels().map(|p| p[3]).collect();
            let mut xobject = pdf.image_xobject(*id, &rgb);
            xobject.width(w);
            xobject.height(h);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
            xobject.s_mask(*mask_id);
            xobject.finish();
            let mut mask = pdf.image_xobject(*mask_id, &alpha);
            mask.width(w);
            mask.height(h);
            mask.color_space().device_gray();
            mask.bits_per_component(8);
            mask.finish();
        }

        pdf.finish()
    }

    pub fn write_to<W: Write + ?Sized>(self, w: &mut W) -> Result<(), SaveError> {
        w.write_all(&self.to_pdf())?;
        Ok(())
    }
}

impl Canvas for PdfCanvas {
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
        if path.is_empty() || !self.state().strokes() {
            return;
        }
        self.begin(true);
        let (width, dash, offset) = {
            let s = self.state();
            (
                s.line_width.raw() as f32,
                s.dash.iter().map(|l| l.raw() as f32).collect::<Vec<_>>(),
                s.dash_offset,
            )
        };
        self.content.set_line_width(width);
        if !dash.is_empty() {
            self.content.set_dash_pattern(dash, offset.raw() as f32);
        }
        self.path(path);
        self.content.stroke();
        self.content.restore_state();
    }

    fn fill(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        self.begin(false);
        self.path(path);
        self.content.fill_nonzero();
        self.content.restore_state();
    }

    fn fill_string(&mut self, font: &Font, at: Point, text: &str) {
        self.stack.set_font(font);
        if text.is_empty() {
            return;
        }
        let resource = self.font_resource(font);
        self.begin(false);
        self.content.begin_text();
        self.content.set_font(Name(resource.as_bytes()), font.size.raw() as f32);
        self.content.set_text_matrix([1.0, 0.0, 0.0, 1.0, at.x.raw() as f32, at.y.raw() as f32]);
        self.content.show(Str(&win_ansi(text)));
        self.content.end_text();
        self.content.restore_state();
    }

    fn draw_image(&mut self, rect: Rectangle, image: &image::RgbaImage) {
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        let name = format!("Im{}", self.images.len());
        self.images.push(image.clone());
        let transform = affine_coefficients(&self.state().transform);
        self.content.save_state();
        self.content.transform(f32s(transform));
        self.content.transform(f32s([
            rect.width().raw(),
            0.0,
            0.0,
            rect.height().raw(),
            rect.min.x.raw(),
            rect.min.y.raw(),
        ]));
        self.content.x_object(Name(name.as_bytes()));
        self.content.restore_state();
    }

    fn dpi(&self) -> f64 {
        72.0
    }
}
