//! Straight-alpha RGBA colors.
//!
//! Backends receive 8-bit straight (non-premultiplied) components. The raster
//! backend premultiplies when handing colors to tiny-skia; vector backends emit
//! the RGB triple and a separate opacity.

use std::fmt;
use std::str::FromStr;

/// An 8-bit RGBA color with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// RGB components as fractions in `[0, 1]`.
    pub fn unit_rgb(self) -> [f64; 3] {
        [f64::from(self.r) / 255.0, f64::from(self.g) / 255.0, f64::from(self.b) / 255.0]
    }

    /// `rgb(r,g,b)` as used in SVG style attributes.
    pub fn to_rgb_string(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Error returned when a color string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color: {0:?}")]
pub struct ParseColorError(pub String);

const NAMED: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("brown", Color::rgb(165, 42, 42)),
    ("pink", Color::rgb(255, 192, 203)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("lightgray", Color::rgb(211, 211, 211)),
    ("lightgrey", Color::rgb(211, 211, 211)),
    ("darkgray", Color::rgb(169, 169, 169)),
    ("darkgrey", Color::rgb(169, 169, 169)),
    ("silver", Color::rgb(192, 192, 192)),
    ("transparent", Color::TRANSPARENT),
];

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parses a color name or `#rgb`, `#rrggbb`, `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(&(_, c)) = NAMED.iter().find(|(name, _)| *name == lower) {
            return Ok(c);
        }
        let err = || ParseColorError(s.to_string());
        let hex = lower.strip_prefix('#').ok_or_else(err)?;
        let digit =
            |i: usize| u8::from_str_radix(hex.get(i..i + 1).unwrap_or("x"), 16).map_err(|_| err());
        let pair =
            |i: usize| u8::from_str_radix(hex.get(i..i + 2).unwrap_or("x"), 16).map_err(|_| err());
        match hex.len() {
            3 => Ok(Color::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
            6 => Ok(Color::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Ok(Color::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => Err(err()),
        }
    }
}
