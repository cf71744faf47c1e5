//! Strongly-typed lengths.
//!
//! All geometry is carried in PostScript points (1/72 inch). Device units only
//! appear at the backend boundary, through a validated [`Dpi`].

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::errors::CanvasError;

/// Length in PostScript points.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);
    /// One inch.
    pub const INCH: Length = Length(72.0);
    /// One centimeter.
    pub const CENTIMETER: Length = Length(72.0 / 2.54);
    /// One millimeter.
    pub const MILLIMETER: Length = Length(72.0 / 25.4);

    #[inline]
    pub const fn points(val: f64) -> Length {
        Length(val)
    }

    #[inline]
    pub fn inches(val: f64) -> Length {
        Length::INCH * val
    }

    #[inline]
    pub fn centimeters(val: f64) -> Length {
        Length::CENTIMETER * val
    }

    #[inline]
    pub fn millimeters(val: f64) -> Length {
        Length::MILLIMETER * val
    }

    /// Length covering `dots` device dots at the given resolution.
    #[inline]
    pub fn from_dots(dots: f64, dpi: Dpi) -> Length {
        Length(dots / dpi.get() * 72.0)
    }

    /// Resolve to device dots: `points / 72 × dpi`.
    #[inline]
    pub fn dots(self, dpi: Dpi) -> f64 {
        self.0 / 72.0 * dpi.get()
    }

    /// Get the raw value in points
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn abs(self) -> Length {
        Length(self.0.abs())
    }

    #[inline]
    pub fn min(self, other: Length) -> Length {
        Length(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }

    /// Ratio of two lengths, `None` when the divisor is zero.
    #[inline]
    pub fn checked_div(self, rhs: Length) -> Option<f64> {
        if rhs.0 == 0.0 { None } else { Some(self.0 / rhs.0) }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length { Length(self.0 + rhs.0) }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length { Length(self.0 - rhs.0) }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}
impl Mul<Length> for f64 {
    type Output = Length;
    fn mul(self, rhs: Length) -> Length { Length(self * rhs.0) }
}
impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length { Length(self.0 / rhs) }
}

// NOTE: Length / Length is not implemented as an operator.
// Use Length::checked_div() so layout math never divides by zero silently.

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length { Length(-self.0) }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, Add::add)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

/// Dots per inch of a target surface.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Dpi(f64);

impl Dpi {
    /// Create a Dpi with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(value: f64) -> Result<Dpi, CanvasError> {
        if value.is_finite() && value > 0.0 {
            Ok(Dpi(value))
        } else {
            Err(CanvasError::InvalidDpi { value })
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Device dots per point.
    #[inline]
    pub fn dots_per_point(self) -> f64 {
        self.0 / 72.0
    }
}

impl fmt::Display for Dpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}dpi", self.0)
    }
}
