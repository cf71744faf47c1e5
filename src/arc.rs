//! Cubic Bézier approximation of circular arcs.
//!
//! Used by backends without a native arc operator (SVG paths, PDF, raster).
//! Each segment spans at most π/2, which keeps the radial error below
//! 2.7e-4 of the radius.

use std::f64::consts::FRAC_PI_2;

use glam::{DVec2, dvec2};

/// Square root of the f64 machine epsilon; sweeps smaller than this are done.
const SWEEP_EPSILON: f64 = 1.490_116_119_384_765_6e-8;

/// A circular arc in raw point coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularArc {
    pub center: DVec2,
    pub radius: f64,
    /// Start angle in radians.
    pub start: f64,
    /// Signed sweep in radians; negative runs clockwise.
    pub sweep: f64,
}

/// One cubic segment; its start is the previous segment's `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub ctrl1: DVec2,
    pub ctrl2: DVec2,
    pub to: DVec2,
}

impl CircularArc {
    pub fn point_at(&self, angle: f64) -> DVec2 {
        self.center + self.radius * dvec2(angle.cos(), angle.sin())
    }

    pub fn start_point(&self) -> DVec2 {
        self.point_at(self.start)
    }

    pub fn end_point(&self) -> DVec2 {
        self.point_at(self.start + self.sweep)
    }

    /// Cubic segments covering the arc from `start` toward `start + sweep`.
    pub fn to_cubics(&self) -> Vec<CubicSegment> {
        let sign = if self.sweep < 0.0 { -1.0 } else { 1.0 };
        let mut remaining = self.sweep.abs();
        let mut a1 = self.start;
        let mut out = Vec::with_capacity((remaining / FRAC_PI_2).ceil() as usize);
        while remaining > SWEEP_EPSILON {
            let step = FRAC_PI_2.min(remaining);
            let a2 = a1 + sign * step;
            out.push(self.segment(a1, a2));
            remaining -= step;
            a1 = a2;
        }
        out
    }

    /// Cubic for the sub-arc `a1..a2`, built on the canonical arc of half-angle
    /// `α` symmetric about the x axis, then rotated by `a1 + α`.
    fn segment(&self, a1: f64, a2: f64) -> CubicSegment {
        let alpha = (a2 - a1) / 2.0;
        let (sin, cos) = alpha.sin_cos();
        let handle = 4.0 / 3.0 * (alpha / 2.0).tan();

        let p1 = dvec2(cos + handle * sin, -sin + handle * cos);
        let p2 = dvec2(cos + handle * sin, sin - handle * cos);
        let p3 = dvec2(cos, sin);

        let rot = DVec2::from_angle(a1 + alpha);
        let place = |v: DVec2| self.center + self.radius * rot.rotate(v);
        CubicSegment { ctrl1: place(p1), ctrl2: place(p2), to: place(p3) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    fn cubic_at(p0: DVec2, c: &CubicSegment, t: f64) -> DVec2 {
        let mt = 1.0 - t;
        p0 * (mt * mt * mt)
            + c.ctrl1 * (3.0 * mt * mt * t)
            + c.ctrl2 * (3.0 * mt * t * t)
            + c.to * (t * t * t)
    }

    #[test]
    fn endpoint_matches_exact_arc() {
        let sweeps = [0.3, FRAC_PI_2, 2.0, PI, 5.5, TAU, 3.0 * TAU + 0.1, -0.7, -PI, -7.0];
        for &start in &[0.0, 0.4, -2.0, 10.0] {
            for &sweep in &sweeps {
                let arc = CircularArc { center: dvec2(3.0, -2.0), radius: 17.5, start, sweep };
                let end = arc.to_cubics().last().map(|c| c.to).unwrap();
                let exact = arc.end_point();
                assert!(
                    (end - exact).length() < 1e-5,
                    "start={start} sweep={sweep}: {end:?} vs {exact:?}"
                );
            }
        }
    }

    #[test]
    fn segments_cover_at_most_a_quarter_turn() {
        let arc = CircularArc { center: DVec2::ZERO, radius: 1.0, start: 0.0, sweep: TAU };
        assert_eq!(arc.to_cubics().len(), 4);
        let arc = CircularArc { sweep: -(PI + 0.01), ..arc };
        assert_eq!(arc.to_cubics().len(), 3);
    }

    #[test]
    fn cubics_stay_near_the_circle() {
        let arc = CircularArc { center: dvec2(1.0, 1.0), radius: 10.0, start: 0.25, sweep: -4.0 };
        let mut p0 = arc.start_point();
        for seg in arc.to_cubics() {
            for i in 1..10 {
                let p = cubic_at(p0, &seg, i as f64 / 10.0);
                let r = (p - arc.center).length();
                assert!((r - 10.0).abs() < 10.0 * 3e-4, "radius {r}");
            }
            p0 = seg.to;
        }
    }

    #[test]
    fn direction_follows_sweep_sign() {
        let arc = CircularArc { center: DVec2::ZERO, radius: 1.0, start: 0.0, sweep: -FRAC_PI_2 };
        let seg = arc.to_cubics()[0];
        assert!(seg.ctrl1.y < 0.0, "clockwise arc should leave downward: {seg:?}");
        assert!((seg.to - dvec2(0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn zero_sweep_emits_nothing() {
        let arc = CircularArc { center: DVec2::ZERO, radius: 1.0, start: 1.0, sweep: 0.0 };
        assert!(arc.to_cubics().is_empty());
    }
}
