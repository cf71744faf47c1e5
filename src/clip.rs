//! Polyline clipping against an axis-aligned rectangle.
//!
//! Each polyline is clipped against one half-plane at a time (left, right,
//! bottom, top). A polyline that leaves a half-plane is split, so one input
//! may yield several outputs. New vertices only appear on boundary crossings.

use glam::{DVec2, dvec2};

use crate::geom::{Point, Rectangle};

/// Slack on the inside test so points on a boundary stay inside.
const INSIDE_EPSILON: f64 = 3e-8;

/// A clipping boundary: a point on the line and the inward normal.
#[derive(Clone, Copy, Debug)]
struct HalfPlane {
    at: DVec2,
    normal: DVec2,
}

impl HalfPlane {
    fn contains(&self, p: DVec2) -> bool {
        self.normal.dot(p - self.at) >= -INSIDE_EPSILON
    }

    /// Intersection of segment `p0 → p1` with the boundary line.
    fn intersect(&self, p0: DVec2, p1: DVec2) -> DVec2 {
        let t = self.normal.dot(p0 - self.at) / self.normal.dot(p0 - p1);
        p0 + (p1 - p0) * t
    }

    fn clip(&self, line: &[Point], out: &mut Vec<Vec<Point>>) {
        let Some(&last) = line.last() else { return };
        let mut current: Vec<Point> = Vec::new();
        for pair in line.windows(2) {
            let (cur, next) = (pair[0].to_dvec2(), pair[1].to_dvec2());
            match (self.contains(cur), self.contains(next)) {
                (true, true) => current.push(pair[0]),
                (true, false) => {
                    current.push(pair[0]);
                    current.push(Point::from_dvec2(self.intersect(cur, next)));
                    out.push(std::mem::take(&mut current));
                }
                (false, true) => current.push(Point::from_dvec2(self.intersect(cur, next))),
                (false, false) => {}
            }
        }
        if self.contains(last.to_dvec2()) {
            current.push(last);
            out.push(current);
        }
    }
}

fn clip_all(planes: &[HalfPlane], lines: &[Vec<Point>]) -> Vec<Vec<Point>> {
    let mut lines: Vec<Vec<Point>> = lines.to_vec();
    for plane in planes {
        let mut next = Vec::with_capacity(lines.len());
        for line in &lines {
            plane.clip(line, &mut next);
        }
        lines = next;
    }
    lines.retain(|l| l.len() >= 2);
    lines
}

fn x_planes(rect: &Rectangle) -> [HalfPlane; 2] {
    let max = rect.max();
    [
        HalfPlane { at: dvec2(rect.min.x.0, 0.0), normal: dvec2(1.0, 0.0) },
        HalfPlane { at: dvec2(max.x.0, 0.0), normal: dvec2(-1.0, 0.0) },
    ]
}

fn y_planes(rect: &Rectangle) -> [HalfPlane; 2] {
    let max = rect.max();
    [
        HalfPlane { at: dvec2(0.0, rect.min.y.0), normal: dvec2(0.0, 1.0) },
        HalfPlane { at: dvec2(0.0, max.y.0), normal: dvec2(0.0, -1.0) },
    ]
}

/// Clip polylines to the horizontal extent of `rect` (left, then right).
pub fn clip_lines_x(rect: &Rectangle, lines: &[Vec<Point>]) -> Vec<Vec<Point>> {
    clip_all(&x_planes(rect), lines)
}

/// Clip polylines to the vertical extent of `rect` (bottom, then top).
pub fn clip_lines_y(rect: &Rectangle, lines: &[Vec<Point>]) -> Vec<Vec<Point>> {
    clip_all(&y_planes(rect), lines)
}

/// Clip polylines to `rect`: X first, then Y.
pub fn clip_lines_xy(rect: &Rectangle, lines: &[Vec<Point>]) -> Vec<Vec<Point>> {
    clip_lines_y(rect, &clip_lines_x(rect, lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::Length;

    fn unit() -> Rectangle {
        Rectangle::with_size(Length(1.0), Length(1.0))
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::pt(x, y)).collect()
    }

    fn close(a: &[Point], b: &[Point]) -> bool {
        a.len() == b.len()
            && a
                .iter()
                .zip(b)
                .all(|(p, q)| (p.x.0 - q.x.0).abs() < 1e-9 && (p.y.0 - q.y.0).abs() < 1e-9)
    }

    #[test]
    fn segment_through_square() {
        let out = clip_lines_xy(&unit(), &[pts(&[(-1.0, 0.5), (2.0, 0.5)])]);
        assert_eq!(out.len(), 1);
        assert!(close(&out[0], &pts(&[(0.0, 0.5), (1.0, 0.5)])), "{out:?}");
    }

    #[test]
    fn inside_polyline_is_unchanged() {
        let line = pts(&[(0.1, 0.1), (0.9, 0.2), (0.5, 0.9), (0.0, 0.0), (1.0, 1.0)]);
        let out = clip_lines_xy(&unit(), &[line.clone()]);
        assert_eq!(out.len(), 1);
        assert!(close(&out[0], &line));
    }

    #[test]
    fn excursion_splits_polyline() {
        // up and out through the top, then back in
        let line = pts(&[(0.1, 0.5), (0.3, 1.5), (0.6, 1.5), (0.8, 0.5)]);
        let out = clip_lines_xy(&unit(), &[line]);
        assert_eq!(out.len(), 2, "{out:?}");
        assert!(close(&out[0], &pts(&[(0.1, 0.5), (0.2, 1.0)])));
        assert!(close(&out[1], &pts(&[(0.7, 1.0), (0.8, 0.5)])));
    }

    #[test]
    fn outside_polyline_vanishes() {
        let out = clip_lines_xy(&unit(), &[pts(&[(2.0, 2.0), (3.0, 5.0), (-4.0, 7.0)])]);
        assert!(out.is_empty());
    }

    #[test]
    fn degenerate_inputs_are_dropped() {
        let out = clip_lines_xy(&unit(), &[vec![], pts(&[(0.5, 0.5)])]);
        assert!(out.is_empty());
    }

    #[test]
    fn outputs_stay_inside_rectangle() {
        let rect = Rectangle::new(Point::pt(-3.0, 2.0), Point::pt(7.0, 4.5));
        // a deterministic zig-zag sweeping well outside the rectangle
        let line: Vec<Point> = (0..200)
            .map(|i| {
                let t = i as f64 * 0.37;
                Point::pt(10.0 * t.sin() + 0.5, 8.0 * (1.7 * t).cos() + 4.0)
            })
            .collect();
        let out = clip_lines_xy(&rect, &[line]);
        assert!(!out.is_empty());
        let max = rect.max();
        for l in &out {
            assert!(l.len() >= 2);
            for p in l {
                assert!(p.x.0 >= rect.min.x.0 - 1e-7 && p.x.0 <= max.x.0 + 1e-7, "{p:?}");
                assert!(p.y.0 >= rect.min.y.0 - 1e-7 && p.y.0 <= max.y.0 + 1e-7, "{p:?}");
            }
        }
    }

    #[test]
    fn x_only_clipping_ignores_y() {
        let out = clip_lines_x(&unit(), &[pts(&[(0.5, -5.0), (0.5, 5.0)])]);
        assert_eq!(out.len(), 1);
        assert!(close(&out[0], &pts(&[(0.5, -5.0), (0.5, 5.0)])));
    }
}
