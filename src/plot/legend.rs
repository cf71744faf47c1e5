//! Plot legends.

use crate::defaults;
use crate::draw::{DrawArea, TextStyle};
use crate::errors::FontError;
use crate::font::Font;
use crate::geom::{Point, Rectangle};
use crate::length::Length;

use super::Thumbnailer;

struct Entry {
    text: String,
    thumbnails: Vec<Box<dyn Thumbnailer>>,
}

/// Rows of thumbnails with their descriptions, drawn over the data area.
pub struct Legend {
    pub text_style: TextStyle,
    /// Vertical gap between rows.
    pub padding: Length,
    /// Anchor at the top instead of the bottom.
    pub top: bool,
    /// Anchor at the left instead of the right.
    pub left: bool,
    pub x_offset: Length,
    pub y_offset: Length,
    pub thumbnail_width: Length,
    entries: Vec<Entry>,
}

impl Legend {
    pub fn new() -> Result<Legend, FontError> {
        let font = Font::new(defaults::FONT, defaults::LEGEND_FONT_SIZE)?;
        Ok(Legend {
            text_style: TextStyle::new(font),
            padding: defaults::LEGEND_PADDING,
            top: false,
            left: false,
            x_offset: Length::ZERO,
            y_offset: Length::ZERO,
            thumbnail_width: defaults::LEGEND_THUMBNAIL_WIDTH,
            entries: Vec::new(),
        })
    }

    /// Add a row. Its thumbnails are drawn on top of each other.
    pub fn add(&mut self, text: impl Into<String>, thumbnails: Vec<Box<dyn Thumbnailer>>) {
        self.entries.push(Entry { text: text.into(), thumbnails });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Height of every row: the tallest entry text.
    fn row_height(&self) -> Length {
        let heights = self.entries.iter().map(|e| self.text_style.rectangle(&e.text).max().y);
        heights.fold(Length::ZERO, Length::max)
    }

    pub fn draw(&self, area: &mut DrawArea<'_>) {
        if self.entries.is_empty() {
            return;
        }
        let mut style = self.text_style.clone();
        let em = style.rectangle(" ").max().x;

        let mut icon_x = area.rect.min.x;
        let mut text_x = icon_x + self.thumbnail_width + em;
        if !self.left {
            icon_x = area.rect.max().x - self.thumbnail_width;
            text_x = icon_x - em;
            style.xalign -= 1.0;
        }
        icon_x += self.x_offset;
        text_x += self.x_offset;

        let row = self.row_height();
        let mut y = if self.top {
            area.rect.max().y - row - style.font.extents().descent
        } else {
            area.rect.min.y + (row + self.padding) * (self.entries.len() - 1) as f64
        };
        y += self.y_offset;

        for entry in &self.entries {
            let icon = Rectangle::new(Point::new(icon_x, y), Point::new(self.thumbnail_width, row));
            for thumb in &entry.thumbnails {
                thumb.thumbnail(&mut area.with_rect(icon));
            }
            let dy = (row - style.rectangle(&entry.text).height()) / 2.0;
            area.fill_text(&style, Point::new(text_x, y + dy), &entry.text);
            y -= row + self.padding;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasOp, Recorder};
    use crate::color::Color;
    use crate::draw::LineStyle;
    use crate::font::testing::install_default_font;

    struct Swatch(Color);

    impl Thumbnailer for Swatch {
        fn thumbnail(&self, area: &mut DrawArea<'_>) {
            area.fill_polygon(self.0, &[area.rect.min, area.rect.max()]);
            let y = area.center().y;
            area.stroke_line2(&LineStyle::default(), area.rect.min.x, y, area.rect.max().x, y);
        }
    }

    fn legend() -> Legend {
        install_default_font();
        let mut legend = Legend::new().unwrap();
        legend.add("first", vec![Box::new(Swatch(Color::rgb(255, 0, 0)))]);
        legend.add("second", vec![Box::new(Swatch(Color::rgb(0, 0, 255)))]);
        legend
    }

    fn strings(rec: &Recorder) -> Vec<(Point, String)> {
        rec.actions()
            .iter()
            .filter_map(|a| match &a.op {
                CanvasOp::FillString { at, text, .. } => Some((*at, text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn rows_stack_downward_from_the_bottom() {
        let legend = legend();
        let mut rec = Recorder::new();
        let mut area = DrawArea::new(&mut rec, Rectangle::with_size(Length(200.0), Length(100.0)));
        legend.draw(&mut area);
        let strings = strings(&rec);
        assert_eq!(strings.len(), 2);
        assert_eq!(strings[0].1, "first");
        let row = legend.row_height().raw();
        assert!((strings[0].0.y.raw() - strings[1].0.y.raw() - row).abs() < 1e-9);
        // right-aligned text ends left of the thumbnails
        assert!(strings.iter().all(|(p, _)| p.x.raw() < 180.0));
    }

    #[test]
    fn left_top_legend() {
        let mut legend = legend();
        legend.left = true;
        legend.top = true;
        let mut rec = Recorder::new();
        let mut area = DrawArea::new(&mut rec, Rectangle::with_size(Length(200.0), Length(100.0)));
        legend.draw(&mut area);
        let strings = strings(&rec);
        assert!(strings.iter().all(|(p, _)| p.x.raw() > 20.0));
        assert!(strings[0].0.y.raw() > 50.0);
        let fills = rec.actions().iter().filter(|a| matches!(a.op, CanvasOp::Fill(_))).count();
        assert_eq!(fills, 2);
    }

    #[test]
    fn empty_legend_draws_nothing() {
        install_default_font();
        let legend = Legend::new().unwrap();
        let mut rec = Recorder::new();
        legend.draw(&mut DrawArea::new(&mut rec, Rectangle::with_size(Length(10.0), Length(10.0))));
        assert!(rec.actions().is_empty());
    }
}
