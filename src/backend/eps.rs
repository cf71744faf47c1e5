//! Encapsulated PostScript output.
//!
//! State operations map one-to-one onto PostScript operators, so the program
//! reads like the canvas calls that produced it. Arcs use the native
//! `arc`/`arcn` operators. The body is kept in memory and written after the
//! `%%BoundingBox` header once drawing is done.

use std::io::Write;

use super::{check_size, fmt_num};
use crate::canvas::{Canvas, CanvasState, StateStack};
use crate::color::Color;
use crate::errors::{CanvasError, SaveError};
use crate::font::{Font, postscript_name};
use crate::geom::Point;
use crate::length::Length;
use crate::path::{Path, PathComp, raise_quad};

/// A canvas producing an EPS document.
#[derive(Debug, Clone)]
pub struct EpsCanvas {
    width: Length,
    height: Length,
    stack: StateStack,
    body: String,
}

impl EpsCanvas {
    pub fn new(width: Length, height: Length) -> Result<Self, CanvasError> {
        check_size(width, height)?;
        let mut canvas = EpsCanvas { width, height, stack: StateStack::new(), body: String::new() };
        // match the initial state frame
        canvas.line("1 setlinewidth");
        canvas.line("0 0 0 setrgbcolor");
        Ok(canvas)
    }

    pub fn state(&self) -> &CanvasState {
        self.stack.top()
    }

    pub fn to_eps(&self) -> String {
        let (w, h) = (self.width.raw(), self.height.raw());
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str("%!PS-Adobe-3.0 EPSF-3.0\n");
        out.push_str(&format!("%%BoundingBox: 0 0 {} {}\n", w.ceil(), h.ceil()));
        out.push_str(&format!("%%HiResBoundingBox: 0 0 {} {}\n", fmt_num(w), fmt_num(h)));
        out.push_str("%%Creator: vgplot\n");
        out.push_str("%%EndComments\n");
        out.push_str(&self.body);
        out.push_str("showpage\n%%EOF\n");
        out
    }

    pub fn write_to<W: Write + ?Sized>(self, w: &mut W) -> Result<(), SaveError> {
        w.write_all(self.to_eps().as_bytes())?;
        Ok(())
    }

    fn line(&mut self, s: &str) {
        self.body.push_str(s);
        self.body.push('\n');
    }

    fn path(&mut self, path: &Path) {
        self.line("newpath");
        let mut current = glam::DVec2::ZERO;
        let mut start = glam::DVec2::ZERO;
        for comp in path {
            let op = match *comp {
                PathComp::Move(p) => {
                    current = p.to_dvec2();
                    start = current;
                    format!("{} {} moveto", fmt_num(p.x.0), fmt_num(p.y.0))
                }
                PathComp::Line(p) => {
                    current = p.to_dvec2();
                    format!("{} {} lineto", fmt_num(p.x.0), fmt_num(p.y.0))
                }
                PathComp::Arc { center, radius, start: a1, angle } => {
                    let end = a1 + angle;
                    current = center.to_dvec2() + radius.raw() * glam::dvec2(end.cos(), end.sin());
                    format!(
                        "{} {} {} {} {} {}",
                        fmt_num(center.x.0),
                        fmt_num(center.y.0),
                        fmt_num(radius.0),
                        fmt_num(a1.to_degrees()),
                        fmt_num(end.to_degrees()),
                        if angle < 0.0 { "arcn" } else { "arc" }
                    )
                }
                PathComp::Quad { ctrl, to } => {
                    let (c1, c2) = raise_quad(current, ctrl.to_dvec2(), to.to_dvec2());
                    current = to.to_dvec2();
                    format!(
                        "{} {} {} {} {} {} curveto",
                        fmt_num(c1.x),
                        fmt_num(c1.y),
                        fmt_num(c2.x),
                        fmt_num(c2.y),
                        fmt_num(to.x.0),
                        fmt_num(to.y.0)
                    )
                }
                PathComp::Cubic { ctrl1, ctrl2, to } => {
                    current = to.to_dvec2();
                    format!(
                        "{} {} {} {} {} {} curveto",
                        fmt_num(ctrl1.x.0),
                        fmt_num(ctrl1.y.0),
                        fmt_num(ctrl2.x.0),
                        fmt_num(ctrl2.y.0),
                        fmt_num(to.x.0),
                        fmt_num(to.y.0)
                    )
                }
                PathComp::Close => {
                    current = start;
                    "closepath".to_string()
                }
            };
            self.line(&op);
        }
    }
}

/// PostScript string literal body.
fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c => {
                // latin-1 octal escape, '?' beyond it
                match u8::try_from(u32::from(c)) {
                    Ok(b) => out.push_str(&format!("\\{b:03o}")),
                    Err(_) => out.push('?'),
                }
            }
        }
    }
    out
}

impl Canvas for EpsCanvas {
    fn set_line_width(&mut self, width: Length) {
        self.stack.set_line_width(width);
        if width.raw() > 0.0 {
            self.line(&format!("{} setlinewidth", fmt_num(width.raw())));
        }
    }

    fn set_line_dash(&mut self, pattern: &[Length], offset: Length) {
        self.stack.set_line_dash(pattern, offset);
        let dashes: Vec<String> = pattern.iter().map(|l| fmt_num(l.raw())).collect();
        self.line(&format!("[{}] {} setdash", dashes.join(" "), fmt_num(offset.raw())));
    }

    fn set_color(&mut self, color: Option<Color>) {
        self.stack.set_color(color);
        let [r, g, b] = self.state().color.unit_rgb();
        self.line(&format!("{} {} {} setrgbcolor", fmt_num(r), fmt_num(g), fmt_num(b)));
    }

    fn rotate(&mut self, angle: f64) {
        self.stack.rotate(angle);
        self.line(&format!("{} rotate", fmt_num(angle.to_degrees())));
    }

    fn translate(&mut self, offset: Point) {
        self.stack.translate(offset);
        self.line(&format!("{} {} translate", fmt_num(offset.x.raw()), fmt_num(offset.y.raw())));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.stack.scale(sx, sy);
        self.line(&format!("{} {} scale", fmt_num(sx), fmt_num(sy)));
    }

    fn push(&mut self) {
        self.stack.push();
        self.line("gsave");
    }

    fn pop(&mut self) {
        if self.stack.pop() {
            self.line("grestore");
        }
    }

    fn stroke(&mut self, path: &Path) {
        if path.is_empty() || !self.state().strokes() {
            return;
        }
        self.path(path);
        self.line("stroke");
    }

    fn fill(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        self.path(path);
        self.line("fill");
    }

    fn fill_string(&mut self, font: &Font, at: Point, text: &str) {
        let changed =
            self.state().font.as_ref().is_none_or(|k| k.name != font.name || k.size != font.size);
        self.stack.set_font(font);
        if changed {
            let name = postscript_name(&font.name).unwrap_or(font.name.as_str());
            self.line(&format!("/{name} findfont {} scalefont setfont", fmt_num(font.size.raw())));
        }
        self.line(&format!("{} {} moveto", fmt_num(at.x.raw()), fmt_num(at.y.raw())));
        self.line(&format!("({}) show", escape_string(text)));
    }

    fn dpi(&self) -> f64 {
        72.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use std::sync::Arc;

    use crate::font::testing::FixedFace;

    #[test]
    fn document_frame() {
        let c = EpsCanvas::new(Length(100.5), Length(50.0)).unwrap();
        insta::assert_snapshot!(c.to_eps(), @r"
        %!PS-Adobe-3.0 EPSF-3.0
        %%BoundingBox: 0 0 101 50
        %%HiResBoundingBox: 0 0 100.5 50
        %%Creator: vgplot
        %%EndComments
        1 setlinewidth
        0 0 0 setrgbcolor
        showpage
        %%EOF
        ");
    }

    #[test]
    fn body_is_written_behind_the_header() {
        let mut c = EpsCanvas::new(Length(10.0), Length(10.0)).unwrap();
        c.stroke(&Path::polyline(&[Point::ORIGIN, Point::pt(5.0, 5.0)]));
        let mut out = Vec::new();
        c.write_to(&mut out).unwrap();
        let eps = String::from_utf8(out).unwrap();
        let header = eps.find("%%EndComments").unwrap();
        let stroke = eps.find("stroke\n").unwrap();
        assert!(header < stroke, "{eps}");
    }

    #[test]
    fn operators_follow_calls() {
        let mut c = EpsCanvas::new(Length(10.0), Length(10.0)).unwrap();
        c.body.clear();
        c.push();
        c.rotate(PI / 2.0);
        c.set_color(Some(Color::rgb(255, 0, 0)));
        let mut p = Path::new();
        p.move_to(Point::pt(1.0, 0.0)).arc(Point::ORIGIN, Length(1.0), 0.0, -PI).close();
        c.stroke(&p);
        c.pop();
        insta::assert_snapshot!(c.body, @r"
        gsave
        90 rotate
        1 0 0 setrgbcolor
        newpath
        1 0 moveto
        0 0 1 0 -180 arcn
        closepath
        stroke
        grestore
        ");
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn unbalanced_pop_emits_nothing() {
        let mut c = EpsCanvas::new(Length(10.0), Length(10.0)).unwrap();
        c.body.clear();
        c.pop();
        assert!(c.body.is_empty());
    }

    #[test]
    fn text_selects_font_once() {
        let face = Arc::new(FixedFace::times_like());
        let font = Font::from_face("LiberationSans-Bold", Length(10.0), face);
        let mut c = EpsCanvas::new(Length(10.0), Length(10.0)).unwrap();
        c.body.clear();
        c.fill_string(&font, Point::pt(1.0, 2.0), "f(x)");
        c.fill_string(&font, Point::pt(1.0, 4.0), "ok");
        insta::assert_snapshot!(c.body, @r"
        /Helvetica-Bold findfont 10 scalefont setfont
        1 2 moveto
        (f\(x\)) show
        1 4 moveto
        (ok) show
        ");
    }
}
