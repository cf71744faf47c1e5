use super::Canvas;
use crate::color::Color;
use crate::font::Font;
use crate::geom::{Point, Rectangle};
use crate::length::Length;
use crate::path::Path;

/// A canvas that forwards every call to each of its targets, in order.
pub struct Tee<'a> {
    targets: Vec<&'a mut dyn Canvas>,
}

impl<'a> Tee<'a> {
    pub fn new(targets: Vec<&'a mut dyn Canvas>) -> Self {
        Tee { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn each(&mut self, mut f: impl FnMut(&mut dyn Canvas)) {
        for target in &mut self.targets {
            f(&mut **target);
        }
    }
}

impl Canvas for Tee<'_> {
    fn set_line_width(&mut self, width: Length) {
        self.each(|c| c.set_line_width(width));
    }

    fn set_line_dash(&mut self, pattern: &[Length], offset: Length) {
        self.each(|c| c.set_line_dash(pattern, offset));
    }

    fn set_color(&mut self, color: Option<Color>) {
        self.each(|c| c.set_color(color));
    }

    fn rotate(&mut self, angle: f64) {
        self.each(|c| c.rotate(angle));
    }

    fn translate(&mut self, offset: Point) {
        self.each(|c| c.translate(offset));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.each(|c| c.scale(sx, sy));
    }

    fn push(&mut self) {
        self.each(|c| c.push());
    }

    fn pop(&mut self) {
        self.each(|c| c.pop());
    }

    fn stroke(&mut self, path: &Path) {
        self.each(|c| c.stroke(path));
    }

    fn fill(&mut self, path: &Path) {
        self.each(|c| c.fill(path));
    }

    fn fill_string(&mut self, font: &Font, at: Point, text: &str) {
        self.each(|c| c.fill_string(font, at, text));
    }

    fn draw_image(&mut self, rect: Rectangle, image: &image::RgbaImage) {
        self.each(|c| c.draw_image(rect, image));
    }

    /// Resolution of the first target, or 72 when there is none.
    fn dpi(&self) -> f64 {
        self.targets.first().map_or(72.0, |c| c.dpi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Recorder;

    #[test]
    fn forwards_to_every_target() {
        let mut a = Recorder::new();
        let mut b = Recorder::new().with_dpi(300.0);
        {
            let targets: Vec<&mut dyn Canvas> = vec![&mut b, &mut a];
            let mut tee = Tee::new(targets);
            tee.push();
            tee.set_color(None);
            tee.stroke(&Rectangle::with_size(Length(1.0), Length(1.0)).path());
            tee.pop();
            assert_eq!(tee.dpi(), 300.0);
        }
        assert_eq!(a.actions().len(), 4);
        assert_eq!(a.to_text(), b.to_text());
    }
}
