//! Error types with diagnostics using miette
//!
//! Configuration and asset errors are returned to the caller. Contract
//! violations inside drawing code panic instead (see the `# Panics` sections
//! on scales and tickers).

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Font Errors
// ============================================================================

/// Errors raised while resolving or parsing a font face.
#[derive(Error, Diagnostic, Debug)]
pub enum FontError {
    #[error("unknown font: {name}")]
    #[diagnostic(
        code(vgplot::font::unknown),
        help("available fonts: {available}")
    )]
    Unknown { name: String, available: String },

    #[error("font file {file} not found")]
    #[diagnostic(
        code(vgplot::font::not_found),
        help(
            "searched {searched:?} and the embedded bundle; \
            set VGFONTPATH or call font::set_font_dirs"
        )
    )]
    NotFound { file: String, searched: Vec<PathBuf> },

    #[error("could not parse font file {file}")]
    #[diagnostic(code(vgplot::font::parse))]
    Parse {
        file: String,
        #[source]
        source: ttf_parser::FaceParsingError,
    },

    #[error("could not read font file {}", path.display())]
    #[diagnostic(code(vgplot::font::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Canvas Errors
// ============================================================================

/// Errors raised when constructing a canvas.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CanvasError {
    #[error("invalid dpi: {value}")]
    #[diagnostic(
        code(vgplot::canvas::invalid_dpi),
        help("dpi must be finite and greater than zero")
    )]
    InvalidDpi { value: f64 },

    #[error("invalid canvas size: {width}x{height}")]
    #[diagnostic(code(vgplot::canvas::invalid_size))]
    InvalidSize { width: f64, height: f64 },
}

// ============================================================================
// Save Errors
// ============================================================================

/// Errors raised while selecting a backend or writing its output.
#[derive(Error, Diagnostic, Debug)]
pub enum SaveError {
    #[error("unsupported file extension: {extension:?}")]
    #[diagnostic(
        code(vgplot::save::unsupported_format),
        help("supported extensions: eps, pdf, svg, png, jpg, jpeg, tif, tiff")
    )]
    UnsupportedFormat { extension: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Canvas(#[from] CanvasError),

    #[error("failed to serialize SVG: {message}")]
    #[diagnostic(code(vgplot::save::svg))]
    Svg { message: String },

    #[error("failed to encode raster image")]
    #[diagnostic(code(vgplot::save::encode))]
    Encode(#[from] image::ImageError),

    #[error("failed to write output")]
    #[diagnostic(code(vgplot::save::io))]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Plot Errors
// ============================================================================

/// Errors raised while building or saving a plot.
#[derive(Error, Diagnostic, Debug)]
pub enum PlotError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Save(#[from] SaveError),

    #[error("nominal {axis} axis needs at least one name")]
    #[diagnostic(code(vgplot::plot::empty_nominal))]
    EmptyNominal { axis: &'static str },
}

// ============================================================================
// Replay Errors
// ============================================================================

/// Errors raised by `Recorder::replay_on` before any drawing happens.
#[derive(Error, Diagnostic, Debug)]
#[error("cannot replay action {index}: font {font:?} does not resolve")]
#[diagnostic(code(vgplot::recorder::font))]
pub struct ReplayError {
    pub index: usize,
    pub font: String,
    #[source]
    pub source: FontError,
}
