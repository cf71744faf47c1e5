//! The drawing-surface contract every backend implements.
//!
//! Coordinates are in points with the origin at the bottom-left and Y up.
//! Transforms compose on the right: after `translate(a); rotate(θ)` a point is
//! rotated first, then translated.

mod ops;
mod recorder;
mod tee;

use enum_dispatch::enum_dispatch;
use glam::{DAffine2, dvec2};

pub use ops::CanvasOp;
pub use recorder::{Action, Recorder};
pub use tee::Tee;

use crate::color::Color;
use crate::defaults;
use crate::font::{Font, FontKey};
use crate::geom::{Point, Rectangle};
use crate::length::Length;
use crate::log::warn;
use crate::path::Path;

/// A drawing surface.
///
/// Canvases are single-threaded; draw on several canvases in parallel by
/// giving each its own thread.
#[enum_dispatch]
pub trait Canvas {
    /// Stroke width; zero or negative disables stroking.
    fn set_line_width(&mut self, width: Length);

    /// Alternating on/off lengths starting `offset` into the pattern. An empty
    /// pattern draws solid lines.
    fn set_line_dash(&mut self, pattern: &[Length], offset: Length);

    /// Fill and stroke color. `None` selects black.
    fn set_color(&mut self, color: Option<Color>);

    /// Counter-clockwise rotation about the current origin, in radians.
    fn rotate(&mut self, angle: f64);

    fn translate(&mut self, offset: Point);

    fn scale(&mut self, sx: f64, sy: f64);

    /// Save the current state frame.
    fn push(&mut self);

    /// Restore the frame saved by the matching [`Canvas::push`].
    fn pop(&mut self);

    /// Outline `path` with the current color, width and dash. Empty paths
    /// draw nothing.
    fn stroke(&mut self, path: &Path);

    /// Fill `path` with the non-zero winding rule.
    fn fill(&mut self, path: &Path);

    /// Draw single-line `text` with its baseline starting at `at`.
    fn fill_string(&mut self, font: &Font, at: Point, text: &str);

    /// Draw `image` scaled into `rect`. Surfaces without image support ignore
    /// the call.
    fn draw_image(&mut self, rect: Rectangle, image: &image::RgbaImage) {
        let _ = (rect, image);
        warn!("draw_image is not supported by this canvas; ignored");
    }

    /// Dots per inch of the target surface.
    fn dpi(&self) -> f64;
}

/// One frame of the canvas state stack.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasState {
    pub color: Color,
    pub line_width: Length,
    pub dash: Vec<Length>,
    pub dash_offset: Length,
    /// Font of the most recent `fill_string`.
    pub font: Option<FontKey>,
    /// User space to canvas space.
    pub transform: DAffine2,
}

impl Default for CanvasState {
    fn default() -> Self {
        CanvasState {
            color: Color::BLACK,
            line_width: defaults::LINE_WIDTH,
            dash: Vec::new(),
            dash_offset: Length::ZERO,
            font: None,
            transform: DAffine2::IDENTITY,
        }
    }
}

impl CanvasState {
    /// Whether strokes are visible at all.
    pub fn strokes(&self) -> bool {
        self.line_width.raw() > 0.0
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::from_dvec2(self.transform.transform_point2(p.to_dvec2()))
    }
}

/// LIFO stack of [`CanvasState`] frames. Never empty.
#[derive(Clone, Debug)]
pub struct StateStack {
    frames: Vec<CanvasState>,
}

impl Default for StateStack {
    fn default() -> Self {
        StateStack { frames: vec![CanvasState::default()] }
    }
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> &CanvasState {
        // the base frame is never popped
        &self.frames[self.frames.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut CanvasState {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Number of frames above the base frame.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn push(&mut self) {
        let top = self.top().clone();
        self.frames.push(top);
    }

    /// Drop the top frame. Returns `false`, leaving the stack alone, when
    /// there is no matching push.
    pub fn pop(&mut self) -> bool {
        debug_assert!(self.frames.len() > 1, "unbalanced Canvas::pop");
        if self.frames.len() == 1 {
            warn!("pop without matching push; ignored");
            return false;
        }
        self.frames.pop();
        true
    }

    pub fn set_line_width(&mut self, width: Length) {
        self.top_mut().line_width = width;
    }

    pub fn set_line_dash(&mut self, pattern: &[Length], offset: Length) {
        let top = self.top_mut();
        top.dash = pattern.to_vec();
        top.dash_offset = offset;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.top_mut().color = color.unwrap_or(Color::BLACK);
    }

    pub fn set_font(&mut self, font: &Font) {
        self.top_mut().font = Some(font.key());
    }

    pub fn rotate(&mut self, angle: f64) {
        let top = self.top_mut();
        top.transform = top.transform * DAffine2::from_angle(angle);
    }

    pub fn translate(&mut self, offset: Point) {
        let top = self.top_mut();
        top.transform = top.transform * DAffine2::from_translation(offset.to_dvec2());
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        let top = self.top_mut();
        top.transform = top.transform * DAffine2::from_scale(dvec2(sx, sy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_close(a: Point, b: Point) {
        assert!((a.x.0 - b.x.0).abs() < 1e-9 && (a.y.0 - b.y.0).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn initial_frame() {
        let stack = StateStack::new();
        let top = stack.top();
        assert_eq!(top.color, Color::BLACK);
        assert_eq!(top.line_width, Length(1.0));
        assert!(top.dash.is_empty());
        assert_eq!(top.transform, DAffine2::IDENTITY);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn transforms_compose_on_the_right() {
        let mut stack = StateStack::new();
        stack.translate(Point::pt(10.0, 0.0));
        stack.rotate(FRAC_PI_2);
        // rotate first: (1,0) -> (0,1), then translate
        assert_close(stack.top().apply(Point::pt(1.0, 0.0)), Point::pt(10.0, 1.0));
    }

    #[test]
    fn scale_flips_y() {
        let mut stack = StateStack::new();
        stack.translate(Point::pt(0.0, 100.0));
        stack.scale(1.0, -1.0);
        assert_close(stack.top().apply(Point::pt(5.0, 10.0)), Point::pt(5.0, 90.0));
    }

    #[test]
    fn balanced_push_pop_restores_state() {
        let mut stack = StateStack::new();
        stack.set_color(Some(Color::rgb(10, 20, 30)));
        let before = stack.top().clone();

        stack.push();
        stack.set_line_width(Length(4.0));
        stack.set_line_dash(&[Length(1.0), Length(2.0)], Length(0.5));
        stack.set_color(None);
        stack.rotate(0.3);
        stack.push();
        stack.translate(Point::pt(3.0, 4.0));
        stack.pop();
        stack.pop();

        assert_eq!(stack.top(), &before);
    }

    #[test]
    fn null_color_is_black() {
        let mut stack = StateStack::new();
        stack.set_color(Some(Color::WHITE));
        stack.set_color(None);
        assert_eq!(stack.top().color, Color::BLACK);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn unbalanced_pop_is_ignored() {
        let mut stack = StateStack::new();
        assert!(!stack.pop());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn non_positive_width_disables_stroking() {
        let mut stack = StateStack::new();
        assert!(stack.top().strokes());
        stack.set_line_width(Length::ZERO);
        assert!(!stack.top().strokes());
    }
}
