use std::fmt;
use std::sync::Arc;

use crate::defaults;
use crate::draw::{DrawArea, LineStyle};
use crate::geom::Point;
use crate::plot::{Plot, Plotter, Thumbnailer};

/// The curve `y = f(x)`, sampled at evenly spaced `x`.
#[derive(Clone)]
pub struct Function {
    f: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
    /// Sampled interval; `None` follows the X axis range.
    pub domain: Option<(f64, f64)>,
    /// At least 2.
    pub samples: usize,
    pub style: LineStyle,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("domain", &self.domain)
            .field("samples", &self.samples)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl Function {
    pub fn new(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Function {
            f: Arc::new(f),
            domain: None,
            samples: defaults::FUNCTION_SAMPLES,
            style: LineStyle::default(),
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        (self.f)(x)
    }
}

impl Plotter for Function {
    fn plot(&self, area: &mut DrawArea<'_>, plot: &Plot) {
        let (min, max) = self.domain.unwrap_or((plot.x.min, plot.x.max));
        let n = self.samples.max(2);
        let step = (max - min) / (n - 1) as f64;
        let (tx, ty) = plot.transforms(area);
        let line: Vec<Point> = (0..n)
            .map(|i| {
                let x = min + i as f64 * step;
                Point::new(tx(x), ty(self.eval(x)))
            })
            .collect();
        let lines = area.clip_lines_xy(&[line]);
        area.stroke_lines(&self.style, &lines);
    }
}

impl Thumbnailer for Function {
    fn thumbnail(&self, area: &mut DrawArea<'_>) {
        let y = area.center().y;
        let (x0, x1) = (area.rect.min.x, area.rect.max().x);
        area.stroke_line2(&self.style, x0, y, x1, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasOp, Recorder};
    use crate::font::testing::install_default_font;
    use crate::geom::Rectangle;
    use crate::length::Length;

    #[test]
    fn samples_across_the_axis() {
        install_default_font();
        let mut plot = Plot::new().unwrap();
        (plot.x.min, plot.x.max, plot.y.min, plot.y.max) = (0.0, 4.0, 0.0, 4.0);
        let mut f = Function::new(|x| x);
        f.samples = 5;
        let mut rec = Recorder::new();
        let bounds = Rectangle::with_size(Length(40.0), Length(40.0));
        f.plot(&mut DrawArea::new(&mut rec, bounds), &plot);
        let Some(CanvasOp::Stroke(path)) = rec.actions().last().map(|a| a.op.clone()) else {
            panic!()
        };
        assert_eq!(path.to_string(), "M 0 0 L 10 10 L 20 20 L 30 30 L 40 40");
    }

    #[test]
    fn explicit_domain_is_clipped() {
        install_default_font();
        let mut plot = Plot::new().unwrap();
        (plot.x.min, plot.x.max, plot.y.min, plot.y.max) = (0.0, 1.0, 0.0, 1.0);
        let mut f = Function::new(|_| 0.5);
        f.domain = Some((-1.5, 2.5));
        f.samples = 3;
        let mut rec = Recorder::new();
        let bounds = Rectangle::with_size(Length(10.0), Length(10.0));
        f.plot(&mut DrawArea::new(&mut rec, bounds), &plot);
        let Some(CanvasOp::Stroke(path)) = rec.actions().last().map(|a| a.op.clone()) else {
            panic!()
        };
        assert_eq!(path.to_string(), "M 0 5 L 5 5 L 10 5");
        assert_eq!(f.eval(3.0), 0.5);
    }
}
