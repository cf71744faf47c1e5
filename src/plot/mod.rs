//! Plot composition.
//!
//! A [`Plot`] owns two axes, a legend and a list of [`Plotter`]s. Drawing
//! fills the background, places the title, sizes the axes, pads the data
//! area so glyphs at the data extremes stay inside it, and then draws axes,
//! data and legend in that order.

mod axis;
mod legend;
mod scale;
mod ticks;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path as FsPath;

pub use axis::{Axis, AxisLabel, TickStyle};
pub use legend::Legend;
pub use scale::{InvertedScale, LinearScale, LogScale, Scale};
pub use ticks::{ConstantTicks, DefaultTicks, LogTicks, Tick, Ticker};

use axis::Orientation;

use crate::backend::{Backend, Format};
use crate::color::Color;
use crate::defaults;
use crate::draw::{DrawArea, TextStyle, align};
use crate::errors::{PlotError, SaveError};
use crate::font::Font;
use crate::geom::{Point, Rectangle};
use crate::length::Length;
use crate::log::trace;

/// Draws data into the plot's data area.
pub trait Plotter {
    /// Draw into `area`, which is already cropped to the data region.
    fn plot(&self, area: &mut DrawArea<'_>, plot: &Plot);

    /// Extent of the data, if it has one. Adding the plotter widens the
    /// axes to cover it.
    fn data_range(&self) -> Option<DataRange> {
        None
    }

    /// Boxes that must stay inside the data area.
    fn glyph_boxes(&self, plot: &Plot) -> Vec<GlyphBox> {
        let _ = plot;
        Vec::new()
    }
}

/// Draws the small sample shown next to a legend entry.
pub trait Thumbnailer {
    fn thumbnail(&self, area: &mut DrawArea<'_>);
}

/// Data extent in axis units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataRange {
    /// Extent of `points`, ignoring NaN coordinates.
    pub fn of_points(points: &[(f64, f64)]) -> DataRange {
        let mut r = DataRange {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        };
        for &(x, y) in points {
            r.x_min = r.x_min.min(x);
            r.x_max = r.x_max.max(x);
            r.y_min = r.y_min.min(y);
            r.y_max = r.y_max.max(y);
        }
        r
    }
}

/// A glyph's bounds around a point given in normalized axis coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphBox {
    pub x: f64,
    pub y: f64,
    /// Bounds relative to the anchor, in points.
    pub rect: Rectangle,
}

/// The plot title.
#[derive(Clone, Debug, PartialEq)]
pub struct Title {
    /// Empty hides the title.
    pub text: String,
    pub style: TextStyle,
    /// Space between the title and the rest of the plot.
    pub padding: Length,
}

/// A complete plot.
pub struct Plot {
    pub title: Title,
    /// `None` leaves the background unpainted.
    pub background: Option<Color>,
    pub x: Axis,
    pub y: Axis,
    pub legend: Legend,
    plotters: Vec<Box<dyn Plotter>>,
}

impl Plot {
    /// A plot with default styles.
    ///
    /// Fails when the default font cannot be loaded.
    pub fn new() -> Result<Plot, PlotError> {
        let mut title = TextStyle::new(Font::new(defaults::FONT, defaults::TITLE_FONT_SIZE)?);
        title.xalign = align::CENTER;
        title.yalign = align::TOP;
        Ok(Plot {
            title: Title { text: String::new(), style: title, padding: defaults::TITLE_PADDING },
            background: Some(Color::WHITE),
            x: Axis::new(Orientation::Horizontal)?,
            y: Axis::new(Orientation::Vertical)?,
            legend: Legend::new()?,
            plotters: Vec::new(),
        })
    }

    /// Add a plotter, widening both axes to its data range.
    pub fn add(&mut self, plotter: impl Plotter + 'static) {
        if let Some(r) = plotter.data_range() {
            // f64::min/max skip NaN
            self.x.min = self.x.min.min(r.x_min);
            self.x.max = self.x.max.max(r.x_max);
            self.y.min = self.y.min.min(r.y_min);
            self.y.max = self.y.max.max(r.y_max);
        }
        self.plotters.push(Box::new(plotter));
    }

    pub fn plotters(&self) -> impl Iterator<Item = &dyn Plotter> {
        self.plotters.iter().map(|p| p.as_ref())
    }

    /// Glyph boxes of every plotter.
    pub fn glyph_boxes(&self) -> Vec<GlyphBox> {
        self.plotters.iter().flat_map(|p| p.glyph_boxes(self)).collect()
    }

    /// Label the X axis with `names` at 0, 1, 2, ... and hide its marks and line.
    pub fn nominal_x(&mut self, names: &[&str]) -> Result<(), PlotError> {
        let first = names.first().ok_or(PlotError::EmptyNominal { axis: "x" })?;
        self.x.tick.line.width = Length::ZERO;
        self.x.tick.length = Length::ZERO;
        self.x.line.width = Length::ZERO;
        self.y.padding = self.x.tick.label.width(first) / 2.0;
        self.x.set_ticker(nominal_ticks(names));
        Ok(())
    }

    /// Label the Y axis with `names` at 0, 1, 2, ... and hide its marks and line.
    pub fn nominal_y(&mut self, names: &[&str]) -> Result<(), PlotError> {
        let first = names.first().ok_or(PlotError::EmptyNominal { axis: "y" })?;
        self.y.tick.line.width = Length::ZERO;
        self.y.tick.length = Length::ZERO;
        self.y.line.width = Length::ZERO;
        self.x.padding = self.y.tick.label.height(first) / 2.0;
        self.y.set_ticker(nominal_ticks(names));
        Ok(())
    }

    pub fn hide_x(&mut self) {
        hide(&mut self.x);
    }

    pub fn hide_y(&mut self) {
        hide(&mut self.y);
    }

    pub fn hide_axes(&mut self) {
        self.hide_x();
        self.hide_y();
    }

    /// Data-to-canvas mapping for `area`, which should be the area a
    /// plotter was handed.
    pub fn transforms<'p>(
        &'p self,
        area: &DrawArea<'_>,
    ) -> (impl Fn(f64) -> Length + use<'p>, impl Fn(f64) -> Length + use<'p>) {
        let rect = area.rect;
        let x = move |v: f64| rect.min.x + rect.width() * self.x.norm(v);
        let y = move |v: f64| rect.min.y + rect.height() * self.y.norm(v);
        (x, y)
    }

    /// Draw the plot into `area`. Sanitizes both axis ranges first.
    pub fn draw(&mut self, area: &mut DrawArea<'_>) {
        if let Some(bg) = self.background {
            area.canvas.set_color(Some(bg));
            area.canvas.fill(&area.rect.path());
        }
        let mut rect = area.rect;
        if !self.title.text.is_empty() {
            let descent = self.title.style.font.extents().descent;
            let at = Point::new(area.center().x, rect.max().y + descent);
            area.fill_text(&self.title.style, at, &self.title.text);
            let shrink = self.title.style.rectangle(&self.title.text).height() + self.title.padding;
            rect =
                Rectangle::from_corners(rect.min, Point::new(rect.max().x, rect.max().y - shrink));
        }

        self.x.sanitize();
        self.y.sanitize();
        let plot: &Plot = self;
        let y_width = plot.y.size();
        let x_height = plot.x.size();

        let mut area = area.with_rect(rect);
        let x_axis = plot.pad_x(area.crop(y_width, Length::ZERO, Length::ZERO, Length::ZERO).rect);
        plot.x.draw(&mut area.with_rect(x_axis));
        let y_axis = plot.pad_y(area.crop(Length::ZERO, x_height, Length::ZERO, Length::ZERO).rect);
        plot.y.draw(&mut area.with_rect(y_axis));

        let inner = area.crop(y_width, x_height, Length::ZERO, Length::ZERO).rect;
        let data = plot.pad_y(plot.pad_x(inner));
        for p in &plot.plotters {
            p.plot(&mut area.with_rect(data), plot);
        }
        plot.legend.draw(&mut area.with_rect(inner));
    }

    /// Shrink `rect` horizontally so the outermost glyph boxes fit inside it.
    fn pad_x(&self, rect: Rectangle) -> Rectangle {
        let mut boxes = self.glyph_boxes();
        let left = extreme(&rect, &boxes, Side::Left);
        boxes.extend(self.x.glyph_boxes());
        let right = extreme(&rect, &boxes, Side::Right);
        let (min, max) = (rect.min.x, rect.max().x);
        let l_over = min - left.map_or(Length::ZERO, |b| b.rect.min.x);
        let r_over = max - right.map_or(Length::ZERO, |b| b.rect.max().x);
        let (lx, rx) = (left.map_or(0.0, |b| b.x), right.map_or(1.0, |b| b.x));
        match solve_padding(lx, l_over, rx, r_over) {
            Some((lo, hi)) => {
                Rectangle::from_corners(Point::new(lo, rect.min.y), Point::new(hi, rect.max().y))
            }
            None => rect,
        }
    }

    /// Shrink `rect` vertically so the outermost glyph boxes fit inside it.
    fn pad_y(&self, rect: Rectangle) -> Rectangle {
        let mut boxes = self.glyph_boxes();
        let bottom = extreme(&rect, &boxes, Side::Bottom);
        boxes.extend(self.y.glyph_boxes());
        let top = extreme(&rect, &boxes, Side::Top);
        let (min, max) = (rect.min.y, rect.max().y);
        let b_over = min - bottom.map_or(Length::ZERO, |b| b.rect.min.y);
        let t_over = max - top.map_or(Length::ZERO, |b| b.rect.max().y);
        let (by, ty) = (bottom.map_or(0.0, |b| b.y), top.map_or(1.0, |b| b.y));
        match solve_padding(by, b_over, ty, t_over) {
            Some((lo, hi)) => {
                Rectangle::from_corners(Point::new(rect.min.x, lo), Point::new(rect.max().x, hi))
            }
            None => rect,
        }
    }

    /// Render to `format` at `width × height` and write the result to `w`.
    /// `dpi` applies to raster formats only.
    pub fn write_to<W: Write + ?Sized>(
        &mut self,
        width: Length,
        height: Length,
        format: Format,
        dpi: Option<f64>,
        w: &mut W,
    ) -> Result<(), PlotError> {
        let mut canvas = Backend::new(format, width, height, dpi).map_err(SaveError::from)?;
        let rect = Rectangle::with_size(width, height);
        self.draw(&mut DrawArea::new(&mut canvas, rect));
        canvas.write_to(w)?;
        Ok(())
    }

    /// Render to the file at `path`, choosing the format by its extension.
    pub fn save(
        &mut self,
        width: Length,
        height: Length,
        path: impl AsRef<FsPath>,
    ) -> Result<(), PlotError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let file = File::create(path).map_err(SaveError::from)?;
        let mut out = BufWriter::new(file);
        self.write_to(width, height, format, None, &mut out)?;
        out.flush().map_err(SaveError::from)?;
        Ok(())
    }
}

fn nominal_ticks(names: &[&str]) -> ConstantTicks {
    let ticks =
        names.iter().enumerate().map(|(i, name)| Tick { value: i as f64, label: name.to_string() });
    ConstantTicks(ticks.collect())
}

fn hide(axis: &mut Axis) {
    axis.tick.length = Length::ZERO;
    axis.line.width = Length::ZERO;
    axis.set_ticker(ConstantTicks(Vec::new()));
}

#[derive(Clone, Copy, PartialEq)]
enum Side {
    Left,
    Right,
    Bottom,
    Top,
}

/// The box reaching furthest past `side` of `rect`, among boxes of positive
/// size anchored inside the axis range.
///
/// The search starts at the edge itself, so only boxes that overhang it are
/// candidates. Glyphs that already fit never push an edge outward.
fn extreme(rect: &Rectangle, boxes: &[GlyphBox], side: Side) -> Option<GlyphBox> {
    let x_of = |b: &GlyphBox| rect.min.x + rect.width() * b.x;
    let y_of = |b: &GlyphBox| rect.min.y + rect.height() * b.y;
    let mut best = None;
    let mut edge = match side {
        Side::Left => rect.min.x,
        Side::Right => rect.max().x,
        Side::Bottom => rect.min.y,
        Side::Top => rect.max().y,
    };
    for b in boxes {
        let (anchor, size) = match side {
            Side::Left | Side::Right => (b.x, b.rect.width()),
            Side::Bottom | Side::Top => (b.y, b.rect.height()),
        };
        if size.raw() <= 0.0 || !(0.0..=1.0).contains(&anchor) {
            continue;
        }
        let reach = match side {
            Side::Left => x_of(b) + b.rect.min.x,
            Side::Right => x_of(b) + b.rect.max().x,
            Side::Bottom => y_of(b) + b.rect.min.y,
            Side::Top => y_of(b) + b.rect.max().y,
        };
        let further = match side {
            Side::Left | Side::Bottom => reach < edge,
            Side::Right | Side::Top => reach > edge,
        };
        if further {
            edge = reach;
            best = Some(*b);
        }
    }
    best
}

/// New `(min, max)` along one direction so the low box (anchor `lo`, edge
/// at `lo_edge`) and the high box (anchor `hi`, edge at `hi_edge`) both end
/// flush with the area. `None` when both anchors coincide.
fn solve_padding(lo: f64, lo_edge: Length, hi: f64, hi_edge: Length) -> Option<(Length, Length)> {
    let d = lo - hi;
    if d == 0.0 {
        trace!(lo, hi, "glyph boxes share an anchor; padding skipped");
        return None;
    }
    let n = (hi_edge * lo - lo_edge * hi) / d;
    let m = (hi_edge * (lo - 1.0) - lo_edge * hi + lo_edge) / d;
    Some((n, m))
}
