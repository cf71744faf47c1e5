//! Synthetic faces for metric tests that must not depend on installed assets.

use ttf_parser::GlyphId;

use super::Face;
use crate::geom::Point;
use crate::path::Path;

/// A face with Times-like vertical metrics at 2048 units per em.
///
/// Printable ASCII maps to glyph `c as u16`; everything else is missing.
/// Advances: space 512, `A`/`V` 1479, everything else 1024. The only kerning
/// pair is `A → V = -264`.
#[derive(Debug, Clone)]
pub(crate) struct FixedFace {
    kerning: bool,
}

impl FixedFace {
    pub(crate) const NOTDEF_ADVANCE: u16 = 1536;

    pub(crate) fn times_like() -> Self {
        FixedFace { kerning: true }
    }

    pub(crate) fn without_kerning(self) -> Self {
        FixedFace { kerning: false }
    }
}

impl Face for FixedFace {
    fn units_per_em(&self) -> u16 {
        2048
    }

    fn ascender(&self) -> i16 {
        1825
    }

    fn descender(&self) -> i16 {
        -443
    }

    fn line_gap(&self) -> i16 {
        87
    }

    fn glyph_index(&self, c: char) -> Option<GlyphId> {
        (c == ' ' || c.is_ascii_graphic()).then(|| GlyphId(c as u16))
    }

    fn glyph_advance(&self, glyph: GlyphId) -> u16 {
        match glyph.0 {
            0 => Self::NOTDEF_ADVANCE,
            0x20 => 512,
            0x41 | 0x56 => 1479,
            _ => 1024,
        }
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> i16 {
        if self.kerning && left.0 == 0x41 && right.0 == 0x56 { -264 } else { 0 }
    }

    fn outline(&self, glyph: GlyphId) -> Option<Path> {
        if glyph.0 == 0x20 {
            return None;
        }
        let w = f64::from(self.glyph_advance(glyph)) - 100.0;
        Some(Path::polygon(&[
            Point::pt(50.0, 0.0),
            Point::pt(w, 0.0),
            Point::pt(w, 1400.0),
            Point::pt(50.0, 1400.0),
        ]))
    }
}

/// Register a [`FixedFace`] under the default plot font so plot code resolves
/// it without the bundled assets.
pub(crate) fn install_default_font() {
    super::add_font(crate::defaults::FONT, std::sync::Arc::new(FixedFace::times_like()));
}
