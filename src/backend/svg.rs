//! SVG output.
//!
//! The document is a `facet_svg` element tree serialized by `facet_xml`.
//! Every `stroke` and `fill` becomes a `<path>` inside a `<g>` carrying the
//! full user-to-device transform, so geometry is written in user space exactly
//! as drawn. Text elements carry their transform themselves.

use std::io::Write;

use facet_svg::facet_xml::{self, SerializeOptions};
use facet_svg::{Group, Path as SvgPath, PathData, Svg, SvgNode, Text};
use glam::{DAffine2, dvec2};

use super::{check_size, fmt_num};
use crate::canvas::{Canvas, CanvasState, StateStack};
use crate::color::Color;
use crate::errors::{CanvasError, SaveError};
use crate::font::{Font, FontDescriptor, FontStyle, FontWeight, resolve_alias};
use crate::geom::{Point, affine_coefficients};
use crate::length::Length;
use crate::path::{Path, Segment};

/// A canvas producing an SVG document.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: Length,
    height: Length,
    stack: StateStack,
    /// Flips to SVG's top-left origin.
    base: DAffine2,
    nodes: Vec<SvgNode>,
}

impl SvgCanvas {
    pub fn new(width: Length, height: Length) -> Result<Self, CanvasError> {
        check_size(width, height)?;
        Ok(SvgCanvas {
            width,
            height,
            stack: StateStack::new(),
            base: DAffine2::from_cols_array(&[1.0, 0.0, 0.0, -1.0, 0.0, height.raw()]),
            nodes: Vec::new(),
        })
    }

    pub fn state(&self) -> &CanvasState {
        self.stack.top()
    }

    /// The complete document.
    pub fn to_svg(&self) -> Result<String, SaveError> {
        let (w, h) = (fmt_num(self.width.raw()), fmt_num(self.height.raw()));
        let svg = Svg {
            width: Some(format!("{w}pt")),
            height: Some(format!("{h}pt")),
            view_box: Some(format!("0 0 {w} {h}")),
            children: self.nodes.clone(),
        };
        let options = SerializeOptions::new().float_formatter(format_float);
        let body = facet_xml::to_string_with_options(&svg, &options)
            .map_err(|e| SaveError::Svg { message: e.to_string() })?;
        Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{body}\n"))
    }

    pub fn write_to<W: Write + ?Sized>(self, w: &mut W) -> Result<(), SaveError> {
        w.write_all(self.to_svg()?.as_bytes())?;
        Ok(())
    }

    /// Wrap `node` in a group placing it with the current transform.
    fn place(&mut self, node: SvgNode) {
        let transform = matrix_attr(&(self.base * self.state().transform));
        self.nodes.push(SvgNode::G(Group {
            transform: Some(transform),
            children: vec![node],
            ..Default::default()
        }));
    }
}

fn format_float(value: f64, w: &mut dyn Write) -> std::io::Result<()> {
    write!(w, "{}", fmt_num(value))
}

fn matrix_attr(m: &DAffine2) -> String {
    let coefficients: Vec<String> = affine_coefficients(m).iter().map(|&v| fmt_num(v)).collect();
    format!("matrix({})", coefficients.join(","))
}

/// SVG path data; arcs and quadratics go through [`Path::segments`].
fn path_data(path: &Path) -> PathData {
    path.segments().into_iter().fold(PathData::new(), |d, seg| match seg {
        Segment::MoveTo(p) => d.m(p.x, p.y),
        Segment::LineTo(p) => d.l(p.x, p.y),
        Segment::CubicTo(c1, c2, p) => d.c(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
        Segment::Close => d.z(),
    })
}

/// `kind-opacity` declaration for translucent colors.
fn opacity(kind: &str, color: Color) -> Option<String> {
    (!color.is_opaque()).then(|| format!("{kind}-opacity:{}", fmt_num(color.opacity())))
}

fn stroke_node(path: &Path, state: &CanvasState) -> SvgNode {
    let dasharray = (!state.dash.is_empty()).then(|| {
        let dash: Vec<String> = state.dash.iter().map(|l| fmt_num(l.raw())).collect();
        dash.join(",")
    });
    let mut style: Vec<String> = opacity("stroke", state.color).into_iter().collect();
    if dasharray.is_some() && state.dash_offset != Length::ZERO {
        style.push(format!("stroke-dashoffset:{}", fmt_num(state.dash_offset.raw())));
    }
    SvgNode::Path(SvgPath {
        d: Some(path_data(path)),
        fill: Some("none".into()),
        stroke: Some(state.color.to_rgb_string()),
        stroke_width: Some(fmt_num(state.line_width.raw())),
        stroke_dasharray: dasharray,
        style: (!style.is_empty()).then(|| style.join(";")),
    })
}

fn fill_node(path: &Path, color: Color) -> SvgNode {
    let mut style = vec!["fill-rule:nonzero".to_string()];
    style.extend(opacity("fill", color));
    SvgNode::Path(SvgPath {
        d: Some(path_data(path)),
        fill: Some(color.to_rgb_string()),
        style: Some(style.join(";")),
        ..Default::default()
    })
}

/// Family, weight and style attributes for a font.
fn font_attrs(font: &Font) -> (String, Option<String>, Option<String>) {
    let concrete = resolve_alias(&font.name).unwrap_or(font.name.as_str());
    let Some(desc) = FontDescriptor::parse(concrete) else {
        return (font.name.clone(), None, None);
    };
    let family = format!("{} {}", desc.typeface, desc.variant);
    let family = format!("{}, {}", family.trim(), desc.generic_family());
    let weight = (desc.weight == FontWeight::Bold).then(|| "bold".to_string());
    let style = (desc.style == FontStyle::Italic).then(|| "italic".to_string());
    (family, weight, style)
}

impl Canvas for SvgCanvas {
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
        let node = stroke_node(path, self.state());
        self.place(node);
    }

    fn fill(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        let node = fill_node(path, self.state().color);
        self.place(node);
    }

    fn fill_string(&mut self, font: &Font, at: Point, text: &str) {
        self.stack.set_font(font);
        if text.is_empty() {
            return;
        }
        // text is laid out with Y down in SVG, so undo the page flip locally
        let m = self.base
            * self.state().transform
            * DAffine2::from_translation(at.to_dvec2())
            * DAffine2::from_scale(dvec2(1.0, -1.0));
        let (family, weight, style) = font_attrs(font);
        let color = self.state().color;
        self.nodes.push(SvgNode::Text(Text {
            transform: Some(matrix_attr(&m)),
            fill: Some(color.to_rgb_string()),
            style: opacity("fill", color),
            font_family: Some(family),
            font_weight: weight,
            font_style: style,
            font_size: Some(fmt_num(font.size.raw())),
            content: Some(text.to_string()),
            ..Default::default()
        }));
    }

    fn dpi(&self) -> f64 {
        72.0
    }
}
