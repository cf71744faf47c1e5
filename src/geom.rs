//! Points, rectangles and affine transforms.
//!
//! The origin is the bottom-left corner and Y grows upward. Affine math is
//! delegated to `glam`; [`Point`] converts to and from `DVec2` in points.

use std::ops::{Add, Sub};

use glam::{DAffine2, DVec2, dvec2};

use crate::length::Length;

/// A point on the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    pub const ORIGIN: Point = Point { x: Length::ZERO, y: Length::ZERO };

    pub fn new(x: Length, y: Length) -> Self {
        Point { x, y }
    }

    /// Point from raw point coordinates.
    pub fn pt(x: f64, y: f64) -> Self {
        Point { x: Length(x), y: Length(y) }
    }

    /// Dot product, in square points.
    pub fn dot(self, other: Point) -> f64 {
        self.x.0 * other.x.0 + self.y.0 * other.y.0
    }

    /// Scale both coordinates by `s`.
    pub fn scale(self, s: f64) -> Point {
        Point { x: self.x * s, y: self.y * s }
    }

    /// Rotate by `angle` radians counter-clockwise about `center`.
    pub fn rotate(self, angle: f64, center: Point) -> Point {
        let c = center.to_dvec2();
        Point::from_dvec2(c + DVec2::from_angle(angle).rotate(self.to_dvec2() - c))
    }

    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x.0, self.y.0)
    }

    pub fn from_dvec2(v: DVec2) -> Point {
        Point::pt(v.x, v.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Axis-aligned rectangle stored as a minimum corner and a size.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rectangle {
    pub min: Point,
    pub size: Point,
}

impl Rectangle {
    pub fn new(min: Point, size: Point) -> Self {
        Rectangle { min, size }
    }

    /// Rectangle spanning two corners.
    pub fn from_corners(min: Point, max: Point) -> Self {
        Rectangle { min, size: max - min }
    }

    /// Rectangle of the given size anchored at the origin.
    pub fn with_size(width: Length, height: Length) -> Self {
        Rectangle { min: Point::ORIGIN, size: Point::new(width, height) }
    }

    pub fn max(&self) -> Point {
        self.min + self.size
    }

    pub fn width(&self) -> Length {
        self.size.x
    }

    pub fn height(&self) -> Length {
        self.size.y
    }

    pub fn center(&self) -> Point {
        self.min + self.size.scale(0.5)
    }

    /// Whether `p` lies inside or on the boundary.
    pub fn contains(&self, p: Point) -> bool {
        self.contains_x(p.x) && self.contains_y(p.y)
    }

    pub fn contains_x(&self, x: Length) -> bool {
        let max = self.max();
        x >= self.min.x && x <= max.x
    }

    pub fn contains_y(&self, y: Length) -> bool {
        let max = self.max();
        y >= self.min.y && y <= max.y
    }

    /// Smallest rectangle enclosing both.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        let (a, b) = (self.max(), other.max());
        Rectangle::from_corners(
            Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Point::new(a.x.max(b.x), a.y.max(b.y)),
        )
    }

    /// Bounding box of a set of points, `None` when empty.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Rectangle> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Rectangle::from_corners(min, max))
    }

    /// Closed path tracing the outline counter-clockwise from `min`.
    pub fn path(&self) -> crate::path::Path {
        let max = self.max();
        let mut p = crate::path::Path::new();
        p.move_to(self.min);
        p.line_to(Point::new(max.x, self.min.y));
        p.line_to(max);
        p.line_to(Point::new(self.min.x, max.y));
        p.close();
        p
    }
}

/// Row-major `[a b c d e f]` coefficients of an affine map, where
/// `x' = a·x + c·y + e` and `y' = b·x + d·y + f`.
pub fn affine_coefficients(m: &DAffine2) -> [f64; 6] {
    m.to_cols_array()
}

/// Scale factor an affine map applies to lengths (geometric mean of the axes).
pub fn affine_length_scale(m: &DAffine2) -> f64 {
    m.matrix2.determinant().abs().sqrt()
}
