//! Fonts and text metrics.
//!
//! A [`Font`] pairs a registry name and a size with a shared, immutable
//! [`Face`]. Faces answer metric questions in font units; `Font` scales the
//! answers to [`Length`]s by `size / units_per_em`.

mod descriptor;
mod opentype;
mod registry;
#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::sync::Arc;

pub use descriptor::{FontDescriptor, FontStyle, FontWeight};
pub use opentype::OpenTypeFace;
pub use registry::{
    FONT_PATH_VAR, add_font, aliases, embedded_fonts, font_dirs, postscript_name, resolve_alias,
    set_font_dirs,
};
pub use ttf_parser::GlyphId;

use crate::errors::FontError;
use crate::length::Length;
use crate::path::Path;

/// Metric view of a parsed font face, in font units.
///
/// Faces are shared between threads through the registry and must not change
/// after construction.
pub trait Face: Send + Sync + fmt::Debug {
    fn units_per_em(&self) -> u16;

    /// Distance from the baseline to the top of the em box (positive).
    fn ascender(&self) -> i16;

    /// Distance from the baseline to the bottom of the em box (negative).
    fn descender(&self) -> i16;

    fn line_gap(&self) -> i16;

    fn glyph_index(&self, c: char) -> Option<GlyphId>;

    fn glyph_advance(&self, glyph: GlyphId) -> u16;

    /// Horizontal kerning adjustment between two glyphs; `0` when absent.
    fn kerning(&self, left: GlyphId, right: GlyphId) -> i16;

    /// Glyph outline in font units with Y up, if the face carries outlines.
    fn outline(&self, _glyph: GlyphId) -> Option<Path> {
        None
    }
}

/// Vertical metrics of a font at its size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontExtents {
    /// Baseline to the top of the tallest glyphs.
    pub ascent: Length,
    /// Baseline to the bottom of the lowest glyphs, reported positive.
    pub descent: Length,
    /// Recommended baseline-to-baseline distance.
    pub height: Length,
}

/// A font name and size without a resolved face.
///
/// This is what canvas state and recorded operations carry; it resolves back
/// to a [`Font`] through the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct FontKey {
    pub name: String,
    pub size: Length,
}

impl FontKey {
    pub fn resolve(&self) -> Result<Font, FontError> {
        Font::new(&self.name, self.size)
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.size)
    }
}

/// A face from the registry at a given size.
#[derive(Clone, Debug)]
pub struct Font {
    pub name: String,
    /// Nominal em height; also the baseline advance of single-line text.
    pub size: Length,
    face: Arc<dyn Face>,
}

impl Font {
    /// Resolve `name` through the registry (see [`resolve_alias`]).
    pub fn new(name: &str, size: Length) -> Result<Font, FontError> {
        let face = registry::face(name)?;
        Ok(Font { name: name.to_string(), size, face })
    }

    /// Wrap an already-parsed face without touching the registry.
    pub fn from_face(name: impl Into<String>, size: Length, face: Arc<dyn Face>) -> Font {
        Font { name: name.into(), size, face }
    }

    /// Same face at a different size.
    pub fn with_size(&self, size: Length) -> Font {
        Font { size, ..self.clone() }
    }

    pub fn face(&self) -> &Arc<dyn Face> {
        &self.face
    }

    pub fn key(&self) -> FontKey {
        FontKey { name: self.name.clone(), size: self.size }
    }

    /// Font units to points at this size.
    pub fn units_to_points(&self) -> f64 {
        self.size.raw() / f64::from(self.face.units_per_em())
    }

    pub fn extents(&self) -> FontExtents {
        let scale = self.units_to_points();
        let ascender = f64::from(self.face.ascender());
        let descender = f64::from(self.face.descender());
        let line_gap = f64::from(self.face.line_gap());
        FontExtents {
            ascent: Length(ascender * scale),
            descent: Length(-descender * scale),
            height: Length((ascender - descender + line_gap) * scale),
        }
    }

    /// Advance width of `s`, kerning included.
    ///
    /// Characters without a glyph measure as the face's `.notdef` glyph.
    pub fn width(&self, s: &str) -> Length {
        let mut units: i64 = 0;
        let mut prev: Option<GlyphId> = None;
        for glyph in self.glyphs(s) {
            if let Some(prev) = prev {
                units += i64::from(self.face.kerning(prev, glyph));
            }
            units += i64::from(self.face.glyph_advance(glyph));
            prev = Some(glyph);
        }
        Length(units as f64 * self.units_to_points())
    }

    /// Glyph ids for `s`, `.notdef` standing in for missing characters.
    pub fn glyphs<'a>(&'a self, s: &'a str) -> impl Iterator<Item = GlyphId> + 'a {
        s.chars().map(|c| self.face.glyph_index(c).unwrap_or(GlyphId(0)))
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Font) -> bool {
        self.name == other.name && self.size == other.size
    }
}
