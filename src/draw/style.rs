use crate::color::Color;
use crate::defaults;
use crate::length::Length;

/// How lines are stroked.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    /// Zero or negative hides the line.
    pub width: Length,
    /// Alternating on/off lengths; empty is solid.
    pub dashes: Vec<Length>,
    pub dash_offset: Length,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: Color::BLACK,
            width: defaults::PLOT_LINE_WIDTH,
            dashes: Vec::new(),
            dash_offset: Length::ZERO,
        }
    }
}

impl LineStyle {
    pub fn new(color: Color, width: Length) -> Self {
        LineStyle { color, width, ..Self::default() }
    }

    pub fn dashed(mut self, dashes: &[Length], offset: Length) -> Self {
        self.dashes = dashes.to_vec();
        self.dash_offset = offset;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.width.raw() > 0.0
    }
}
