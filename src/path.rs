//! Path IR shared by every backend.
//!
//! A [`Path`] is an ordered list of [`PathComp`]s. Arcs stay a single
//! component no matter how far they sweep; [`Path::segments`] lowers a path to
//! move/line/cubic/close for backends without native arcs or quadratics.

use std::fmt;

use glam::DVec2;

use crate::arc;
use crate::geom::Point;
use crate::length::Length;

/// One drawing component of a [`Path`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathComp {
    /// Set the current point and start a new subpath.
    Move(Point),
    /// Straight segment from the current point.
    Line(Point),
    /// Circular arc centered at `center`, starting at angle `start` and
    /// sweeping `angle` radians (positive is counter-clockwise).
    Arc { center: Point, radius: Length, start: f64, angle: f64 },
    /// Quadratic Bézier with one control point.
    Quad { ctrl: Point, to: Point },
    /// Cubic Bézier with two control points.
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
    /// Straight segment back to the most recent `Move` target.
    Close,
}

/// A path lowered to the primitives every output format supports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    MoveTo(DVec2),
    LineTo(DVec2),
    CubicTo(DVec2, DVec2, DVec2),
    Close,
}

/// An ordered sequence of drawing components.
///
/// Paths are plain values: helpers clone them freely, e.g. before clipping.
/// A well-formed path starts with a `Move`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Path {
    comps: Vec<PathComp>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open polyline through `points`. Empty input gives an empty path.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Path::new();
        let mut iter = points.iter();
        if let Some(&first) = iter.next() {
            path.move_to(first);
            for &p in iter {
                path.line_to(p);
            }
        }
        path
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Path::polyline(points);
        if !path.is_empty() {
            path.close();
        }
        path
    }

    /// Full circle, as a single arc component.
    pub fn circle(center: Point, radius: Length) -> Self {
        let mut path = Path::new();
        path.move_to(Point::new(center.x + radius, center.y));
        path.arc(center, radius, 0.0, std::f64::consts::TAU);
        path.close();
        path
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.comps.push(PathComp::Move(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.comps.push(PathComp::Line(p));
        self
    }

    /// Append an arc. `start` and `angle` are in radians; `|angle|` may exceed 2π.
    pub fn arc(&mut self, center: Point, radius: Length, start: f64, angle: f64) -> &mut Self {
        self.comps.push(PathComp::Arc { center, radius, start, angle });
        self
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) -> &mut Self {
        self.comps.push(PathComp::Quad { ctrl, to });
        self
    }

    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> &mut Self {
        self.comps.push(PathComp::Cubic { ctrl1, ctrl2, to });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.comps.push(PathComp::Close);
        self
    }

    pub fn len(&self) -> usize {
        self.comps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comps.is_empty()
    }

    /// Components in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathComp> {
        self.comps.iter()
    }

    pub fn comps(&self) -> &[PathComp] {
        &self.comps
    }

    /// Lower to move/line/cubic/close.
    ///
    /// Arcs become a line to their start point followed by cubic segments of
    /// at most π/2 each; quadratics are raised to cubics.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(self.comps.len());
        let mut current = DVec2::ZERO;
        let mut subpath_start = DVec2::ZERO;
        for comp in &self.comps {
            match *comp {
                PathComp::Move(p) => {
                    current = p.to_dvec2();
                    subpath_start = current;
                    out.push(Segment::MoveTo(current));
                }
                PathComp::Line(p) => {
                    current = p.to_dvec2();
                    out.push(Segment::LineTo(current));
                }
                PathComp::Arc { center, radius, start, angle } => {
                    let arc = arc::CircularArc {
                        center: center.to_dvec2(),
                        radius: radius.raw(),
                        start,
                        sweep: angle,
                    };
                    out.push(Segment::LineTo(arc.start_point()));
                    for cubic in arc.to_cubics() {
                        out.push(Segment::CubicTo(cubic.ctrl1, cubic.ctrl2, cubic.to));
                    }
                    current = arc.end_point();
                }
                PathComp::Quad { ctrl, to } => {
                    let (c1, c2) = raise_quad(current, ctrl.to_dvec2(), to.to_dvec2());
                    current = to.to_dvec2();
                    out.push(Segment::CubicTo(c1, c2, current));
                }
                PathComp::Cubic { ctrl1, ctrl2, to } => {
                    current = to.to_dvec2();
                    out.push(Segment::CubicTo(ctrl1.to_dvec2(), ctrl2.to_dvec2(), current));
                }
                PathComp::Close => {
                    current = subpath_start;
                    out.push(Segment::Close);
                }
            }
        }
        out
    }
}

/// Control points of the cubic equivalent to the quadratic `p0, q, p1`.
pub(crate) fn raise_quad(p0: DVec2, q: DVec2, p1: DVec2) -> (DVec2, DVec2) {
    (p0 + (q - p0) * (2.0 / 3.0), p1 + (q - p1) * (2.0 / 3.0))
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathComp;
    type IntoIter = std::slice::Iter<'a, PathComp>;

    fn into_iter(self) -> Self::IntoIter {
        self.comps.iter()
    }
}

impl FromIterator<PathComp> for Path {
    fn from_iter<I: IntoIterator<Item = PathComp>>(iter: I) -> Self {
        Path { comps: iter.into_iter().collect() }
    }
}

impl fmt::Display for PathComp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::backend::fmt_num as n;
        match *self {
            PathComp::Move(p) => write!(f, "M {} {}", n(p.x.0), n(p.y.0)),
            PathComp::Line(p) => write!(f, "L {} {}", n(p.x.0), n(p.y.0)),
            PathComp::Arc { center, radius, start, angle } => write!(
                f,
                "A {} {} r={} start={} angle={}",
                n(center.x.0),
                n(center.y.0),
                n(radius.0),
                n(start),
                n(angle)
            ),
            PathComp::Quad { ctrl, to } => {
                write!(f, "Q {} {} {} {}", n(ctrl.x.0), n(ctrl.y.0), n(to.x.0), n(to.y.0))
            }
            PathComp::Cubic { ctrl1, ctrl2, to } => write!(
                f,
                "C {} {} {} {} {} {}",
                n(ctrl1.x.0),
                n(ctrl1.y.0),
                n(ctrl2.x.0),
                n(ctrl2.y.0),
                n(to.x.0),
                n(to.y.0)
            ),
            PathComp::Close => write!(f, "Z"),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, comp) in self.comps.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{comp}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn builder_keeps_insertion_order() {
        let mut p = Path::new();
        p.move_to(Point::pt(0.0, 0.0))
            .line_to(Point::pt(1.0, 0.0))
            .quad_to(Point::pt(2.0, 1.0), Point::pt(3.0, 0.0))
            .close();
        let kinds: Vec<_> = p.iter().map(std::mem::discriminant).collect();
        assert_eq!(kinds.len(), 4);
        assert_eq!(kinds[0], std::mem::discriminant(&PathComp::Move(Point::ORIGIN)));
        assert_eq!(kinds[3], std::mem::discriminant(&PathComp::Close));
    }

    #[test]
    fn large_arc_stays_one_component() {
        let mut p = Path::new();
        p.move_to(Point::pt(1.0, 0.0));
        p.arc(Point::ORIGIN, Length(1.0), 0.0, 3.0 * TAU);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn segments_decompose_arc_into_quarter_turns() {
        let mut p = Path::new();
        p.move_to(Point::pt(1.0, 0.0));
        p.arc(Point::ORIGIN, Length(1.0), 0.0, PI);
        let segs = p.segments();
        // move, line to arc start, two quarter cubics
        assert_eq!(segs.len(), 4);
        match segs[3] {
            Segment::CubicTo(_, _, end) => {
                assert!((end.x + 1.0).abs() < 1e-9 && end.y.abs() < 1e-9, "{end:?}");
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn segments_raise_quadratics() {
        let mut p = Path::new();
        p.move_to(Point::pt(0.0, 0.0)).quad_to(Point::pt(3.0, 3.0), Point::pt(6.0, 0.0));
        match p.segments()[1] {
            Segment::CubicTo(c1, c2, to) => {
                assert!((c1 - DVec2::new(2.0, 2.0)).length() < 1e-12);
                assert!((c2 - DVec2::new(4.0, 2.0)).length() < 1e-12);
                assert_eq!(to, DVec2::new(6.0, 0.0));
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn polyline_of_nothing_is_empty() {
        assert!(Path::polyline(&[]).is_empty());
        assert!(Path::polygon(&[]).is_empty());
        assert_eq!(Path::polygon(&[Point::ORIGIN, Point::pt(1.0, 1.0)]).len(), 3);
    }

    #[test]
    fn display_lists_components() {
        let mut p = Path::new();
        p.move_to(Point::pt(0.0, 1.5)).line_to(Point::pt(2.0, 0.0)).close();
        assert_eq!(p.to_string(), "M 0 1.5 L 2 0 Z");
    }
}
