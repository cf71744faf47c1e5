use crate::color::Color;
use crate::draw::{DrawArea, LineStyle};
use crate::geom::Point;
use crate::path::Path;
use crate::plot::{DataRange, Plot, Plotter, Thumbnailer};

/// Points joined by straight lines, optionally filled down to the bottom of
/// the Y axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub points: Vec<(f64, f64)>,
    pub style: LineStyle,
    pub fill: Option<Color>,
}

impl Line {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Line { points, style: LineStyle::default(), fill: None }
    }
}

impl Plotter for Line {
    fn plot(&self, area: &mut DrawArea<'_>, plot: &Plot) {
        let pts = super::to_canvas(&self.points, area, plot);
        if let (Some(color), Some(first), Some(last)) = (self.fill, pts.first(), pts.last()) {
            let (_, ty) = plot.transforms(area);
            let base = ty(plot.y.min);
            let mut path = Path::new();
            path.move_to(Point::new(first.x, base));
            for &p in &pts {
                path.line_to(p);
            }
            path.line_to(Point::new(last.x, base)).close();
            area.canvas.set_color(Some(color));
            area.canvas.fill(&path);
        }
        let lines = area.clip_lines_xy(&[pts]);
        area.stroke_lines(&self.style, &lines);
    }

    fn data_range(&self) -> Option<DataRange> {
        Some(DataRange::of_points(&self.points))
    }
}

impl Thumbnailer for Line {
    fn thumbnail(&self, area: &mut DrawArea<'_>) {
        let r = area.rect;
        if let Some(color) = self.fill {
            let top = if self.style.is_visible() { r.center().y } else { r.max().y };
            let corners = [
                r.min,
                Point::new(r.min.x, top),
                Point::new(r.max().x, top),
                Point::new(r.max().x, r.min.y),
            ];
            area.fill_polygon(color, &corners);
        }
        if self.style.is_visible() {
            let y = r.center().y;
            area.stroke_line2(&self.style, r.min.x, y, r.max().x, y);
        }
    }
}
