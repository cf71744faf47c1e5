//! Output backends and format selection.
//!
//! Every backend is a [`Canvas`] sink. [`Backend`] dispatches over them so a
//! plot can be drawn without knowing the output format until save time.

mod eps;
mod pdf;
mod raster;
mod svg;

use std::io::Write;
use std::path::Path as FsPath;

use enum_dispatch::enum_dispatch;

pub use eps::EpsCanvas;
pub use pdf::PdfCanvas;
pub use raster::{RasterCanvas, RasterEncoding};
pub use svg::SvgCanvas;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::defaults;
use crate::errors::{CanvasError, SaveError};
use crate::font::Font;
use crate::geom::{Point, Rectangle};
use crate::length::Length;
use crate::path::Path;

/// Output file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Eps,
    Pdf,
    Svg,
    Png,
    Jpeg,
    Tiff,
}

impl Format {
    /// Format for a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Result<Format, SaveError> {
        match ext.to_ascii_lowercase().as_str() {
            "eps" => Ok(Format::Eps),
            "pdf" => Ok(Format::Pdf),
            "svg" => Ok(Format::Svg),
            "png" => Ok(Format::Png),
            "jpg" | "jpeg" => Ok(Format::Jpeg),
            "tif" | "tiff" => Ok(Format::Tiff),
            _ => Err(SaveError::UnsupportedFormat { extension: ext.to_string() }),
        }
    }

    /// Format for a file name by its extension.
    pub fn from_path(path: impl AsRef<FsPath>) -> Result<Format, SaveError> {
        let ext = path.as_ref().extension().and_then(|e| e.to_str()).unwrap_or("");
        Format::from_extension(ext)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Eps => "eps",
            Format::Pdf => "pdf",
            Format::Svg => "svg",
            Format::Png => "png",
            Format::Jpeg => "jpg",
            Format::Tiff => "tiff",
        }
    }

    pub fn is_raster(self) -> bool {
        matches!(self, Format::Png | Format::Jpeg | Format::Tiff)
    }

    pub const ALL: [Format; 6] =
        [Format::Eps, Format::Pdf, Format::Svg, Format::Png, Format::Jpeg, Format::Tiff];
}

/// A canvas for any output format.
#[enum_dispatch(Canvas)]
#[derive(Debug)]
pub enum Backend {
    Svg(SvgCanvas),
    Eps(EpsCanvas),
    Pdf(PdfCanvas),
    Raster(RasterCanvas),
}

impl Backend {
    /// A canvas of `width × height` for `format`. `dpi` only applies to
    /// raster formats and defaults to [`defaults::RASTER_DPI`].
    pub fn new(
        format: Format,
        width: Length,
        height: Length,
        dpi: Option<f64>,
    ) -> Result<Backend, CanvasError> {
        Ok(match format {
            Format::Svg => Backend::Svg(SvgCanvas::new(width, height)?),
            Format::Eps => Backend::Eps(EpsCanvas::new(width, height)?),
            Format::Pdf => Backend::Pdf(PdfCanvas::new(width, height)?),
            Format::Png | Format::Jpeg | Format::Tiff => {
                let encoding = match format {
                    Format::Jpeg => RasterEncoding::Jpeg,
                    Format::Tiff => RasterEncoding::Tiff,
                    _ => RasterEncoding::Png,
                };
                let dpi = dpi.unwrap_or(defaults::RASTER_DPI);
                Backend::Raster(RasterCanvas::new(width, height, dpi)?.with_encoding(encoding))
            }
        })
    }

    /// Write the finished output.
    pub fn write_to<W: Write + ?Sized>(self, w: &mut W) -> Result<(), SaveError> {
        match self {
            Backend::Svg(c) => c.write_to(w),
            Backend::Eps(c) => c.write_to(w),
            Backend::Pdf(c) => c.write_to(w),
            Backend::Raster(c) => c.write_to(w),
        }
    }
}

pub(crate) fn check_size(width: Length, height: Length) -> Result<(), CanvasError> {
    if width.is_finite() && height.is_finite() && width.raw() > 0.0 && height.raw() > 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidSize { width: width.raw(), height: height.raw() })
    }
}

/// Format a number for vector output: 6 significant digits, trailing zeros
/// trimmed.
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    const SIG_FIGS: i32 = 6;

    // Round to significant figures
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(SIG_FIGS - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (SIG_FIGS - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// C-style `%g`: 6 significant digits, exponent form below 1e-4 and from
/// 1e6 up, trailing zeros trimmed.
pub fn format_g(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let sci = format!("{value:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..6).contains(&exp) {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exp.abs());
    }
    let decimals = (5 - exp).max(0) as usize;
    let s = format!("{value:.decimals$}");
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.').to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_by_extension() {
        assert_eq!(Format::from_path("plot.SVG").unwrap(), Format::Svg);
        assert_eq!(Format::from_path("a/b/plot.jpeg").unwrap(), Format::Jpeg);
        assert_eq!(Format::from_path("plot.tif").unwrap(), Format::Tiff);
        assert!(matches!(
            Format::from_path("plot.bmp"),
            Err(SaveError::UnsupportedFormat { extension }) if extension == "bmp"
        ));
        assert!(Format::from_path("plot").is_err());
        for f in Format::ALL {
            assert_eq!(Format::from_extension(f.extension()).unwrap(), f);
        }
        let raster: Vec<Format> = Format::ALL.into_iter().filter(|f| f.is_raster()).collect();
        assert_eq!(raster, [Format::Png, Format::Jpeg, Format::Tiff]);
    }

    #[test]
    fn fmt_num_trims() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(1234567.0), "1234570");
        assert_eq!(fmt_num(0.1 + 0.2), "0.3");
        assert_eq!(fmt_num(-2.0 / 3.0), "-0.666667");
        assert_eq!(fmt_num(-1e-9), "-0.000000001");
    }

    #[test]
    fn format_g_matches_printf() {
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(0.5), "0.5");
        assert_eq!(format_g(0.30000000000000004), "0.3");
        assert_eq!(format_g(100.0), "100");
        assert_eq!(format_g(-2.5), "-2.5");
        assert_eq!(format_g(123456.0), "123456");
        assert_eq!(format_g(1e6), "1e+06");
        assert_eq!(format_g(2.5e-5), "2.5e-05");
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(1234567.0), "1.23457e+06");
    }

    #[test]
    fn backend_dispatches_canvas() {
        let mut b = Backend::new(Format::Svg, Length(10.0), Length(10.0), None).unwrap();
        b.fill(&Rectangle::with_size(Length(1.0), Length(1.0)).path());
        assert_eq!(b.dpi(), 72.0);
        let mut out = Vec::new();
        b.write_to(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("<path"));

        let raster = Backend::new(Format::Png, Length(72.0), Length(36.0), Some(300.0)).unwrap();
        assert_eq!(raster.dpi(), 300.0);
        assert!(Backend::new(Format::Pdf, Length(-1.0), Length(1.0), None).is_err());
    }
}
