use std::panic::Location;
use std::sync::Arc;

use super::{Canvas, CanvasOp};
use crate::color::Color;
use crate::errors::ReplayError;
use crate::font::Font;
use crate::geom::{Point, Rectangle};
use crate::length::Length;
use crate::log::trace;
use crate::path::Path;

/// A recorded canvas call.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub op: CanvasOp,
    /// Where the call was made, when the recorder captures locations.
    pub location: Option<&'static Location<'static>>,
}

/// A canvas that logs every call so it can be inspected or replayed.
#[derive(Clone, Debug)]
pub struct Recorder {
    actions: Vec<Action>,
    dpi: f64,
    capture_locations: bool,
}

impl Default for Recorder {
    fn default() -> Self {
        Recorder { actions: Vec::new(), dpi: 72.0, capture_locations: false }
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that also notes the caller of every operation.
    pub fn with_locations() -> Self {
        Recorder { capture_locations: true, ..Self::default() }
    }

    /// Report `dpi` from [`Canvas::dpi`], for code that sizes output by it.
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.actions.clear();
    }

    /// Apply the recorded calls, in order, to `target`.
    ///
    /// Every font is resolved through the registry first; if any fails, the
    /// error is returned and nothing is drawn.
    pub fn replay_on(&self, target: &mut dyn Canvas) -> Result<(), ReplayError> {
        let fonts = self
            .actions
            .iter()
            .enumerate()
            .map(|(index, action)| {
                action
                    .op
                    .font()
                    .map(|key| {
                        let font = key.name.clone();
                        key.resolve().map_err(|source| ReplayError { index, font, source })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<Option<Font>>, _>>()?;

        trace!(actions = self.actions.len(), "replaying recording");
        for (action, font) in self.actions.iter().zip(&fonts) {
            action.op.apply(target, font.as_ref());
        }
        Ok(())
    }

    /// The log as text, one operation per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for action in &self.actions {
            out.push_str(&action.op.to_string());
            out.push('\n');
        }
        out
    }

    #[track_caller]
    fn record(&mut self, op: CanvasOp) {
        let location = if self.capture_locations { Some(Location::caller()) } else { None };
        self.actions.push(Action { op, location });
    }
}

impl Canvas for Recorder {
    #[track_caller]
    fn set_line_width(&mut self, width: Length) {
        self.record(CanvasOp::SetLineWidth(width));
    }

    #[track_caller]
    fn set_line_dash(&mut self, pattern: &[Length], offset: Length) {
        self.record(CanvasOp::SetLineDash { pattern: pattern.to_vec(), offset });
    }

    #[track_caller]
    fn set_color(&mut self, color: Option<Color>) {
        self.record(CanvasOp::SetColor(color));
    }

    #[track_caller]
    fn rotate(&mut self, angle: f64) {
        self.record(CanvasOp::Rotate(angle));
    }

    #[track_caller]
    fn translate(&mut self, offset: Point) {
        self.record(CanvasOp::Translate(offset));
    }

    #[track_caller]
    fn scale(&mut self, sx: f64, sy: f64) {
        self.record(CanvasOp::Scale(sx, sy));
    }

    #[track_caller]
    fn push(&mut self) {
        self.record(CanvasOp::Push);
    }

    #[track_caller]
    fn pop(&mut self) {
        self.record(CanvasOp::Pop);
    }

    #[track_caller]
    fn stroke(&mut self, path: &Path) {
        self.record(CanvasOp::Stroke(path.clone()));
    }

    #[track_caller]
    fn fill(&mut self, path: &Path) {
        self.record(CanvasOp::Fill(path.clone()));
    }

    #[track_caller]
    fn fill_string(&mut self, font: &Font, at: Point, text: &str) {
        self.record(CanvasOp::FillString { font: font.key(), at, text: text.to_string() });
    }

    #[track_caller]
    fn draw_image(&mut self, rect: Rectangle, image: &image::RgbaImage) {
        self.record(CanvasOp::DrawImage { rect, image: Arc::new(image.clone()) });
    }

    fn dpi(&self) -> f64 {
        self.dpi
    }
}
