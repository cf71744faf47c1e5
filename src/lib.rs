//! Backend-agnostic 2D vector graphics and plotting.
//!
//! Drawing goes through the [`Canvas`] trait: a small set of stateful
//! operations (line style, color, transforms, push/pop, stroke, fill, text,
//! images) in points with the origin at the bottom-left. SVG, EPS, PDF and
//! raster canvases live in [`backend`]; [`Recorder`] and [`Tee`] are canvases
//! that capture or fan out the same calls.
//!
//! On top of that, [`plot`] composes axes, tick labels, legends and
//! [`plotter`]s into a figure and saves it by file extension:
//!
//! ```no_run
//! use vgplot::plot::Plot;
//! use vgplot::plotter::Line;
//! use vgplot::Length;
//!
//! let mut p = Plot::new()?;
//! p.title.text = "Squares".into();
//! p.add(Line::new((0..10).map(|i| (i as f64, (i * i) as f64)).collect()));
//! p.save(Length::inches(4.0), Length::inches(3.0), "squares.svg")?;
//! # Ok::<(), vgplot::PlotError>(())
//! ```
//!
//! Text metrics come from TrueType faces resolved through the [`font`]
//! registry. PostScript names such as `Times-Roman` map to the Liberation
//! faces, found in [`font::font_dirs`] or in the embedded bundle.

mod log;

pub mod arc;
pub mod clip;
pub mod color;
pub mod defaults;
pub mod errors;
pub mod geom;
pub mod length;
pub mod path;

pub mod font;

pub mod canvas;

pub mod backend;

pub mod draw;
pub mod plot;
pub mod plotter;

pub use backend::{Backend, Format};
pub use canvas::{Canvas, CanvasOp, Recorder, Tee};
pub use color::Color;
pub use errors::{CanvasError, FontError, PlotError, ReplayError, SaveError};
pub use font::{Font, FontExtents};
pub use geom::{Point, Rectangle};
pub use length::{Dpi, Length};
pub use path::{Path, PathComp};
