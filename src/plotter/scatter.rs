use crate::draw::{DrawArea, GlyphStyle};
use crate::plot::{DataRange, GlyphBox, Plot, Plotter, Thumbnailer};

/// A glyph at each point.
#[derive(Clone, Debug, PartialEq)]
pub struct Scatter {
    pub points: Vec<(f64, f64)>,
    pub glyph: GlyphStyle,
}

impl Scatter {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Scatter { points, glyph: GlyphStyle::default() }
    }
}

impl Plotter for Scatter {
    fn plot(&self, area: &mut DrawArea<'_>, plot: &Plot) {
        for p in super::to_canvas(&self.points, area, plot) {
            area.draw_glyph(&self.glyph, p);
        }
    }

    fn data_range(&self) -> Option<DataRange> {
        Some(DataRange::of_points(&self.points))
    }

    fn glyph_boxes(&self, plot: &Plot) -> Vec<GlyphBox> {
        let rect = self.glyph.rectangle();
        self.points
            .iter()
            .map(|&(x, y)| GlyphBox { x: plot.x.norm(x), y: plot.y.norm(y), rect })
            .collect()
    }
}

impl Thumbnailer for Scatter {
    fn thumbnail(&self, area: &mut DrawArea<'_>) {
        let center = area.center();
        area.draw_glyph(&self.glyph, center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasOp, Recorder};
    use crate::draw::GlyphShape;
    use crate::font::testing::install_default_font;
    use crate::geom::{Point, Rectangle};
    use crate::length::Length;

    #[test]
    fn glyphs_and_boxes() {
        install_default_font();
        let mut plot = Plot::new().unwrap();
        let mut scatter = Scatter::new(vec![(0.0, 0.0), (5.0, 10.0), (20.0, 5.0)]);
        scatter.glyph = GlyphStyle { radius: Length(3.0), ..GlyphStyle::new(GlyphShape::Circle) };
        (plot.x.min, plot.x.max, plot.y.min, plot.y.max) = (0.0, 10.0, 0.0, 10.0);

        let boxes = scatter.glyph_boxes(&plot);
        assert_eq!(boxes.len(), 3);
        assert_eq!((boxes[1].x, boxes[1].y), (0.5, 1.0));
        assert_eq!(boxes[1].rect, Rectangle::new(Point::pt(-3.0, -3.0), Point::pt(6.0, 6.0)));

        let mut rec = Recorder::new();
        let bounds = Rectangle::with_size(Length(100.0), Length(100.0));
        scatter.plot(&mut DrawArea::new(&mut rec, bounds), &plot);
        // the point at x = 20 is off the area and skipped
        let fills = rec.actions().iter().filter(|a| matches!(a.op, CanvasOp::Fill(_))).count();
        assert_eq!(fills, 2);
    }
}
