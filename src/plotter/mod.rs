//! Ready-made plotters.

mod function;
mod line;
mod scatter;

pub use function::Function;
pub use line::Line;
pub use scatter::Scatter;

use crate::draw::DrawArea;
use crate::geom::Point;
use crate::plot::Plot;

/// Data points mapped into `area`.
fn to_canvas(points: &[(f64, f64)], area: &DrawArea<'_>, plot: &Plot) -> Vec<Point> {
    let (tx, ty) = plot.transforms(area);
    points.iter().map(|&(x, y)| Point::new(tx(x), ty(y))).collect()
}
