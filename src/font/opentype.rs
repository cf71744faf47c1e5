//! [`Face`] over a TrueType/OpenType file parsed by `ttf-parser`.

use std::fmt;

use ttf_parser::{FaceParsingError, GlyphId, OutlineBuilder};

use super::Face;
use crate::geom::Point;
use crate::path::Path;

/// A parsed OpenType face.
///
/// Faces live in the process-wide cache for the life of the program, so the
/// font data is `'static`: either embedded bytes or a buffer handed over with
/// [`OpenTypeFace::from_vec`].
pub struct OpenTypeFace {
    face: ttf_parser::Face<'static>,
}

impl OpenTypeFace {
    /// Parse the first face of an embedded font.
    pub fn from_static(data: &'static [u8]) -> Result<Self, FaceParsingError> {
        Ok(OpenTypeFace { face: ttf_parser::Face::parse(data, 0)? })
    }

    /// Parse the first face of `data`, taking ownership of the buffer for the
    /// remainder of the process.
    pub fn from_vec(data: Vec<u8>) -> Result<Self, FaceParsingError> {
        // validate before the buffer is leaked
        ttf_parser::Face::parse(&data, 0)?;
        let data: &'static [u8] = Box::leak(data.into_boxed_slice());
        Self::from_static(data)
    }

    pub fn glyph_count(&self) -> u16 {
        self.face.number_of_glyphs()
    }
}

impl fmt::Debug for OpenTypeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenTypeFace")
            .field("units_per_em", &self.face.units_per_em())
            .field("glyphs", &self.face.number_of_glyphs())
            .finish()
    }
}

impl Face for OpenTypeFace {
    fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    fn ascender(&self) -> i16 {
        self.face.ascender()
    }

    fn descender(&self) -> i16 {
        self.face.descender()
    }

    fn line_gap(&self) -> i16 {
        self.face.line_gap()
    }

    fn glyph_index(&self, c: char) -> Option<GlyphId> {
        self.face.glyph_index(c)
    }

    fn glyph_advance(&self, glyph: GlyphId) -> u16 {
        self.face.glyph_hor_advance(glyph).unwrap_or(0)
    }

    /// First match among the horizontal, non-variable `kern` subtables.
    fn kerning(&self, left: GlyphId, right: GlyphId) -> i16 {
        let Some(kern) = &self.face.tables().kern else {
            return 0;
        };
        kern.subtables
            .into_iter()
            .filter(|st| st.horizontal && !st.variable)
            .find_map(|st| st.glyphs_kerning(left, right))
            .unwrap_or(0)
    }

    fn outline(&self, glyph: GlyphId) -> Option<Path> {
        let mut builder = PathOutline(Path::new());
        self.face.outline_glyph(glyph, &mut builder)?;
        Some(builder.0)
    }
}

/// Collects `ttf-parser` outline callbacks into a [`Path`] in font units.
struct PathOutline(Path);

impl OutlineBuilder for PathOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(pt(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(pt(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(pt(x1, y1), pt(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(pt(x1, y1), pt(x2, y2), pt(x, y));
    }

    fn close(&mut self) {
        self.0.close();
    }
}

fn pt(x: f32, y: f32) -> Point {
    Point::pt(f64::from(x), f64::from(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_rejected() {
        let err = OpenTypeFace::from_vec(b"definitely not a font".to_vec()).unwrap_err();
        assert_eq!(err, FaceParsingError::UnknownMagic);
        assert!(OpenTypeFace::from_static(&[]).is_err());
    }
}
