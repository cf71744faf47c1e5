//! Canvas calls as values.

use std::fmt;
use std::sync::Arc;

use super::Canvas;
use crate::backend::fmt_num;
use crate::color::Color;
use crate::font::{Font, FontKey};
use crate::geom::{Point, Rectangle};
use crate::length::Length;
use crate::path::Path;

/// One [`Canvas`] call with its arguments.
///
/// Fonts are carried by name and size so a recorded stream can be replayed
/// against a different registry.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    SetLineWidth(Length),
    SetLineDash { pattern: Vec<Length>, offset: Length },
    SetColor(Option<Color>),
    Rotate(f64),
    Translate(Point),
    Scale(f64, f64),
    Push,
    Pop,
    Stroke(Path),
    Fill(Path),
    FillString { font: FontKey, at: Point, text: String },
    DrawImage { rect: Rectangle, image: Arc<image::RgbaImage> },
}

impl CanvasOp {
    /// Perform the call on `canvas`. `font` must be the resolved font of a
    /// `FillString`; other operations ignore it.
    pub(crate) fn apply(&self, canvas: &mut dyn Canvas, font: Option<&Font>) {
        match self {
            CanvasOp::SetLineWidth(w) => canvas.set_line_width(*w),
            CanvasOp::SetLineDash { pattern, offset } => canvas.set_line_dash(pattern, *offset),
            CanvasOp::SetColor(c) => canvas.set_color(*c),
            CanvasOp::Rotate(a) => canvas.rotate(*a),
            CanvasOp::Translate(p) => canvas.translate(*p),
            CanvasOp::Scale(sx, sy) => canvas.scale(*sx, *sy),
            CanvasOp::Push => canvas.push(),
            CanvasOp::Pop => canvas.pop(),
            CanvasOp::Stroke(path) => canvas.stroke(path),
            CanvasOp::Fill(path) => canvas.fill(path),
            CanvasOp::FillString { at, text, .. } => {
                if let Some(font) = font {
                    canvas.fill_string(font, *at, text);
                }
            }
            CanvasOp::DrawImage { rect, image } => canvas.draw_image(*rect, image),
        }
    }

    /// Font this operation needs resolved before replay.
    pub fn font(&self) -> Option<&FontKey> {
        match self {
            CanvasOp::FillString { font, .. } => Some(font),
            _ => None,
        }
    }
}

impl fmt::Display for CanvasOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasOp::SetLineWidth(w) => write!(f, "set_line_width {}", fmt_num(w.0)),
            CanvasOp::SetLineDash { pattern, offset } => {
                let pattern: Vec<String> = pattern.iter().map(|l| fmt_num(l.0)).collect();
                write!(f, "set_line_dash [{}] {}", pattern.join(" "), fmt_num(offset.0))
            }
            CanvasOp::SetColor(Some(c)) => write!(f, "set_color {c}"),
            CanvasOp::SetColor(None) => write!(f, "set_color none"),
            CanvasOp::Rotate(a) => write!(f, "rotate {}", fmt_num(*a)),
            CanvasOp::Translate(p) => write!(f, "translate {} {}", fmt_num(p.x.0), fmt_num(p.y.0)),
            CanvasOp::Scale(sx, sy) => write!(f, "scale {} {}", fmt_num(*sx), fmt_num(*sy)),
            CanvasOp::Push => write!(f, "push"),
            CanvasOp::Pop => write!(f, "pop"),
            CanvasOp::Stroke(path) => write!(f, "stroke {path}"),
            CanvasOp::Fill(path) => write!(f, "fill {path}"),
            CanvasOp::FillString { font, at, text } => write!(
                f,
                "fill_string {} {} at {} {} {text:?}",
                font.name,
                fmt_num(font.size.0),
                fmt_num(at.x.0),
                fmt_num(at.y.0)
            ),
            CanvasOp::DrawImage { rect, image } => write!(
                f,
                "draw_image {} {} {} {} ({}x{})",
                fmt_num(rect.min.x.0),
                fmt_num(rect.min.y.0),
                fmt_num(rect.size.x.0),
                fmt_num(rect.size.y.0),
                image.width(),
                image.height()
            ),
        }
    }
}
