//! Plot axes: range, scale, ticks, and how they are laid out.

use std::f64::consts::FRAC_PI_2;

use crate::color::Color;
use crate::defaults;
use crate::draw::{DrawArea, LineStyle, TextStyle, align};
use crate::errors::FontError;
use crate::font::Font;
use crate::geom::Point;
use crate::length::Length;

use super::GlyphBox;
use super::scale::{LinearScale, Scale};
use super::ticks::{DefaultTicks, Tick, Ticker};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Orientation {
    Horizontal,
    Vertical,
}

/// The axis title.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    /// Empty hides the label.
    pub text: String,
    pub style: TextStyle,
}

/// How ticks are generated and drawn.
pub struct TickStyle {
    pub label: TextStyle,
    pub line: LineStyle,
    /// Length of major marks; minor marks are half as long. Zero hides marks.
    pub length: Length,
    pub marker: Box<dyn Ticker>,
}

/// One axis of a plot.
pub struct Axis {
    /// Lower end of the data range; `+∞` until data is added.
    pub min: f64,
    /// Upper end of the data range; `-∞` until data is added.
    pub max: f64,
    pub label: AxisLabel,
    pub line: LineStyle,
    /// Space between the axis and the data area.
    pub padding: Length,
    pub tick: TickStyle,
    pub scale: Box<dyn Scale>,
    orientation: Orientation,
}

impl Axis {
    pub(crate) fn new(orientation: Orientation) -> Result<Axis, FontError> {
        let label_font = Font::new(defaults::FONT, defaults::AXIS_LABEL_FONT_SIZE)?;
        let tick_font = Font::new(defaults::FONT, defaults::TICK_LABEL_FONT_SIZE)?;

        let mut label_style = TextStyle::new(label_font);
        label_style.xalign = align::CENTER;
        label_style.yalign = align::BOTTOM;

        let mut tick_label = TextStyle::new(tick_font);
        (tick_label.xalign, tick_label.yalign) = match orientation {
            Orientation::Horizontal => (align::CENTER, align::TOP),
            Orientation::Vertical => (align::RIGHT, align::MIDDLE),
        };

        Ok(Axis {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            label: AxisLabel { text: String::new(), style: label_style },
            line: LineStyle::new(Color::BLACK, defaults::AXIS_LINE_WIDTH),
            padding: defaults::AXIS_PADDING,
            tick: TickStyle {
                label: tick_label,
                line: LineStyle::new(Color::BLACK, defaults::AXIS_LINE_WIDTH),
                length: defaults::TICK_LENGTH,
                marker: Box::new(DefaultTicks),
            },
            scale: Box::new(LinearScale),
            orientation,
        })
    }

    pub fn set_scale(&mut self, scale: impl Scale + 'static) {
        self.scale = Box::new(scale);
    }

    pub fn set_ticker(&mut self, ticker: impl Ticker + 'static) {
        self.tick.marker = Box::new(ticker);
    }

    /// Make the range drawable: infinities become 0, a reversed range is
    /// swapped, and an empty one is widened by 1 each way.
    pub fn sanitize(&mut self) {
        if self.min.is_infinite() {
            self.min = 0.0;
        }
        if self.max.is_infinite() {
            self.max = 0.0;
        }
        if self.min > self.max {
            std::mem::swap(&mut self.min, &mut self.max);
        }
        if self.min == self.max {
            self.min -= 1.0;
            self.max += 1.0;
        }
    }

    /// Position of `x` along the axis, 0 at `min` and 1 at `max`.
    pub fn norm(&self, x: f64) -> f64 {
        self.scale.normalize(self.min, self.max, x)
    }

    /// Ticks for the current range, without any outside it.
    pub fn ticks(&self) -> Vec<Tick> {
        let (min, max) = (self.min, self.max);
        let mut ticks = self.tick.marker.ticks(min, max);
        ticks.retain(|t| t.value >= min && t.value <= max);
        ticks
    }

    fn draws_marks(&self) -> bool {
        self.tick.length.raw() > 0.0 && self.tick.line.is_visible()
    }

    fn tick_label_height(&self, ticks: &[Tick]) -> Length {
        let labels = ticks.iter().filter(|t| !t.is_minor());
        labels.map(|t| self.tick.label.rectangle(&t.label).height()).fold(Length::ZERO, Length::max)
    }

    fn tick_label_width(&self, ticks: &[Tick]) -> Length {
        let labels = ticks.iter().filter(|t| !t.is_minor());
        labels.map(|t| self.tick.label.rectangle(&t.label).width()).fold(Length::ZERO, Length::max)
    }

    /// Length of a tick mark's gap at the axis-line end.
    fn mark_offset(&self, tick: &Tick) -> Length {
        if tick.is_minor() { self.tick.length / 2.0 } else { Length::ZERO }
    }

    /// Room the axis takes across its direction: height for the X axis,
    /// width for the Y axis.
    pub(crate) fn size(&self) -> Length {
        let mut size = Length::ZERO;
        if !self.label.text.is_empty() {
            size -= self.label.style.font.extents().descent;
            size += self.label.style.height(&self.label.text);
        }
        let ticks = self.ticks();
        if !ticks.is_empty() {
            match self.orientation {
                Orientation::Horizontal => size += self.tick_label_height(&ticks),
                Orientation::Vertical => {
                    let w = self.tick_label_width(&ticks);
                    if w.raw() > 0.0 {
                        size += w + self.tick.label.width(" ");
                    }
                }
            }
            if self.draws_marks() {
                size += self.tick.length;
            }
        }
        size + self.line.width / 2.0 + self.padding
    }

    pub(crate) fn draw(&self, area: &mut DrawArea<'_>) {
        match self.orientation {
            Orientation::Horizontal => self.draw_horizontal(area),
            Orientation::Vertical => self.draw_vertical(area),
        }
    }

    /// Bottom up: label, tick labels, marks, axis line.
    fn draw_horizontal(&self, area: &mut DrawArea<'_>) {
        let mut y = area.rect.min.y;
        if !self.label.text.is_empty() {
            y -= self.label.style.font.extents().descent;
            let at = Point::new(area.center().x, y);
            area.fill_text(&self.label.style, at, &self.label.text);
            y += self.label.style.height(&self.label.text);
        }

        let ticks = self.ticks();
        let label_height = self.tick_label_height(&ticks);
        for t in ticks.iter().filter(|t| !t.is_minor()) {
            let x = area.x(self.norm(t.value));
            if area.contains_x(x) {
                area.fill_text(&self.tick.label, Point::new(x, y + label_height), &t.label);
            }
        }
        if ticks.is_empty() {
            y += self.line.width / 2.0;
        } else {
            y += label_height;
        }

        if !ticks.is_empty() && self.draws_marks() {
            let len = self.tick.length;
            for t in &ticks {
                let x = area.x(self.norm(t.value));
                if area.contains_x(x) {
                    area.stroke_line2(&self.tick.line, x, y + self.mark_offset(t), x, y + len);
                }
            }
            y += len;
        }

        let (x0, x1) = (area.rect.min.x, area.rect.max().x);
        area.stroke_line2(&self.line, x0, y, x1, y);
    }

    /// Left to right: rotated label, tick labels, marks, axis line.
    fn draw_vertical(&self, area: &mut DrawArea<'_>) {
        let mut x = area.rect.min.x;
        if !self.label.text.is_empty() {
            let mut style = self.label.style.clone();
            style.rotation += FRAC_PI_2;
            x += self.label.style.height(&self.label.text);
            area.fill_text(&style, Point::new(x, area.center().y), &self.label.text);
            x += self.label.style.font.extents().descent;
        }

        let ticks = self.ticks();
        let label_width = self.tick_label_width(&ticks);
        if label_width.raw() > 0.0 {
            x += label_width;
        }
        let mut labeled = false;
        for t in ticks.iter().filter(|t| !t.is_minor()) {
            let y = area.y(self.norm(t.value));
            if area.contains_y(y) {
                area.fill_text(&self.tick.label, Point::new(x, y), &t.label);
                labeled = true;
            }
        }
        if labeled {
            x += self.tick.label.width(" ");
        }

        if !ticks.is_empty() && self.draws_marks() {
            let len = self.tick.length;
            for t in &ticks {
                let y = area.y(self.norm(t.value));
                if area.contains_y(y) {
                    area.stroke_line2(&self.tick.line, x + self.mark_offset(t), y, x + len, y);
                }
            }
            x += len;
        }

        let (y0, y1) = (area.rect.min.y, area.rect.max().y);
        area.stroke_line2(&self.line, x, y0, x, y1);
    }

    /// Boxes around the tick labels, anchored at their normalized positions.
    pub(crate) fn glyph_boxes(&self) -> Vec<GlyphBox> {
        self.ticks()
            .into_iter()
            .filter(|t| !t.is_minor())
            .map(|t| {
                let rect = self.tick.label.rectangle(&t.label);
                let pos = self.norm(t.value);
                match self.orientation {
                    Orientation::Horizontal => GlyphBox { x: pos, y: 0.0, rect },
                    Orientation::Vertical => GlyphBox { x: 0.0, y: pos, rect },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasOp, Recorder};
    use crate::font::testing::install_default_font;
    use crate::geom::Rectangle;
    use crate::plot::ticks::ConstantTicks;

    fn axis(orientation: Orientation) -> Axis {
        install_default_font();
        Axis::new(orientation).unwrap()
    }

    #[test]
    fn sanitize_cases() {
        let mut a = axis(Orientation::Horizontal);
        a.sanitize();
        assert_eq!((a.min, a.max), (-1.0, 1.0));

        (a.min, a.max) = (5.0, 2.0);
        a.sanitize();
        assert_eq!((a.min, a.max), (2.0, 5.0));

        (a.min, a.max) = (3.0, 3.0);
        a.sanitize();
        assert_eq!((a.min, a.max), (2.0, 4.0));

        (a.min, a.max) = (f64::NEG_INFINITY, 4.0);
        a.sanitize();
        assert_eq!((a.min, a.max), (0.0, 4.0));
    }

    #[test]
    fn out_of_range_ticks_are_dropped() {
        let mut a = axis(Orientation::Horizontal);
        (a.min, a.max) = (0.0, 1.0);
        a.set_ticker(ConstantTicks(vec![Tick::major(-1.0), Tick::major(0.5), Tick::minor(2.0)]));
        assert_eq!(a.ticks(), vec![Tick::major(0.5)]);
    }

    #[test]
    fn horizontal_size_adds_up() {
        let mut a = axis(Orientation::Horizontal);
        (a.min, a.max) = (0.0, 1.0);
        let label_height = a
            .ticks()
            .iter()
            .filter(|t| !t.is_minor())
            .map(|t| a.tick.label.rectangle(&t.label).height())
            .fold(Length::ZERO, Length::max);
        let want = label_height
            + defaults::TICK_LENGTH
            + defaults::AXIS_LINE_WIDTH / 2.0
            + defaults::AXIS_PADDING;
        assert!((a.size().raw() - want.raw()).abs() < 1e-9);

        a.label.text = "x".into();
        let ext = a.label.style.font.extents();
        let with_label = want + ext.ascent - ext.descent;
        assert!((a.size().raw() - with_label.raw()).abs() < 1e-9);
    }

    #[test]
    fn hidden_ticks_leave_line_and_padding() {
        let mut a = axis(Orientation::Vertical);
        (a.min, a.max) = (0.0, 1.0);
        a.set_ticker(ConstantTicks(Vec::new()));
        assert_eq!(a.size(), defaults::AXIS_LINE_WIDTH / 2.0 + defaults::AXIS_PADDING);
    }

    #[test]
    fn horizontal_draw_ends_with_axis_line() {
        let mut a = axis(Orientation::Horizontal);
        (a.min, a.max) = (0.0, 1.0);
        let mut rec = Recorder::new();
        let bounds = Rectangle::new(Point::pt(0.0, 0.0), Point::pt(200.0, 40.0));
        let mut area = DrawArea::new(&mut rec, bounds);
        a.draw(&mut area);
        let ops: Vec<CanvasOp> = rec.actions().iter().map(|a| a.op.clone()).collect();
        let labels = ops.iter().filter(|op| matches!(op, CanvasOp::FillString { .. })).count();
        // majors 0, 0.5 and 1 with eight minors between
        assert_eq!(labels, 3);
        let strokes = ops.iter().filter(|op| matches!(op, CanvasOp::Stroke(_))).count();
        assert_eq!(strokes, 11 + 1);
        let Some(CanvasOp::Stroke(line)) = ops.last() else { panic!("{ops:?}") };
        let y =
            a.size().raw() - defaults::AXIS_LINE_WIDTH.raw() / 2.0 - defaults::AXIS_PADDING.raw();
        assert_eq!(line.to_string(), format!("M 0 {y} L 200 {y}", y = crate::backend::fmt_num(y)));
    }

    #[test]
    fn vertical_glyph_boxes_anchor_on_y() {
        let mut a = axis(Orientation::Vertical);
        (a.min, a.max) = (0.0, 10.0);
        let boxes = a.glyph_boxes();
        assert!(!boxes.is_empty());
        assert!(boxes.iter().all(|b| b.x == 0.0 && (0.0..=1.0).contains(&b.y)));
        // right aligned labels sit left of their anchor
        assert!(boxes.iter().all(|b| b.rect.max().x.raw() <= 1e-9));
    }
}
