//! Default sizes and settings (all in points)

use crate::length::Length;

/// Canvas line width before any `set_line_width`.
pub const LINE_WIDTH: Length = Length::points(1.0);

pub const AXIS_LINE_WIDTH: Length = Length::points(0.5);
pub const AXIS_PADDING: Length = Length::points(5.0);
pub const TICK_LENGTH: Length = Length::points(8.0);
pub const AXIS_LABEL_FONT_SIZE: Length = Length::points(12.0);
pub const TICK_LABEL_FONT_SIZE: Length = Length::points(10.0);

pub const TITLE_FONT_SIZE: Length = Length::points(12.0);
/// Space between the title and the top of the axes.
pub const TITLE_PADDING: Length = Length::points(5.0);

pub const LEGEND_FONT_SIZE: Length = Length::points(12.0);
pub const LEGEND_THUMBNAIL_WIDTH: Length = Length::points(20.0);
pub const LEGEND_PADDING: Length = Length::points(0.0);

pub const PLOT_LINE_WIDTH: Length = Length::points(1.0);
pub const GLYPH_RADIUS: Length = Length::points(2.5);

/// Face used for titles, labels and legends.
pub const FONT: &str = "Times-Roman";

/// Resolution of raster output when none is given.
pub const RASTER_DPI: f64 = 96.0;

/// Samples drawn per function plot.
pub const FUNCTION_SAMPLES: usize = 50;
