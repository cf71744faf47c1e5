use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use vgplot::draw::{GlyphShape, GlyphStyle, LineStyle};
use vgplot::plot::Plot;
use vgplot::plotter::{Function, Line, Scatter};
use vgplot::{Color, Format, Length, PlotError};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery <dir>   Render the sample plot to every output format");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "gallery" => {
            let dir = args.get(2).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("gallery"));
            if let Err(e) = gallery(&dir) {
                eprintln!("gallery failed: {e}");
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

/// The sample: a damped sine as line + markers, and its envelope.
fn sample_plot() -> Result<Plot, PlotError> {
    let mut p = Plot::new()?;
    p.title.text = "Damped oscillation".into();
    p.x.label.text = "t (s)".into();
    p.y.label.text = "amplitude".into();

    let points: Vec<(f64, f64)> = (0..=40)
        .map(|i| {
            let t = f64::from(i) / 4.0;
            (t, (-t / 4.0).exp() * (2.0 * t).cos())
        })
        .collect();

    let mut line = Line::new(points.clone());
    line.style = LineStyle::new(Color::rgb(31, 119, 180), Length(1.5));
    line.fill = Some(Color::rgba(31, 119, 180, 40));

    let mut markers = Scatter::new(points);
    markers.glyph =
        GlyphStyle { color: Color::rgb(31, 119, 180), ..GlyphStyle::new(GlyphShape::Circle) };

    let mut envelope = Function::new(|t| (-t / 4.0).exp());
    envelope.style = LineStyle::new(Color::rgb(214, 39, 40), Length(1.0))
        .dashed(&[Length(4.0), Length(2.0)], Length::ZERO);

    p.legend.top = true;
    p.legend.add("signal", vec![Box::new(line.clone()), Box::new(markers.clone())]);
    p.legend.add("envelope", vec![Box::new(envelope.clone())]);
    p.add(line);
    p.add(markers);
    p.add(envelope);
    Ok(p)
}

fn gallery(dir: &Path) -> Result<(), PlotError> {
    fs::create_dir_all(dir).map_err(vgplot::SaveError::from)?;

    // one plot and one canvas per thread
    let written: Vec<(Format, PathBuf)> = Format::ALL
        .as_slice()
        .par_iter()
        .map(|&format| -> Result<(Format, PathBuf), PlotError> {
            let path = dir.join(format!("sample.{}", format.extension()));
            eprintln!("Rendering {}...", path.display());
            sample_plot()?.save(Length::inches(5.0), Length::inches(3.5), &path)?;
            Ok((format, path))
        })
        .collect::<Result<_, _>>()?;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n");
    html.push_str("    <title>vgplot gallery</title>\n</head>\n<body>\n");
    for (format, path) in &written {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        // browsers show SVG and most raster formats inline, but not TIFF
        if *format == Format::Svg || (format.is_raster() && *format != Format::Tiff) {
            html.push_str(&format!(
                "    <figure><img src=\"{name}\" width=\"480\">\
                    <figcaption>{name}</figcaption></figure>\n"
            ));
        } else {
            html.push_str(&format!("    <p><a href=\"{name}\">{name}</a></p>\n"));
        }
    }
    html.push_str("</body>\n</html>\n");
    fs::write(dir.join("index.html"), html).map_err(vgplot::SaveError::from)?;

    eprintln!("Wrote {} files to {}", written.len() + 1, dir.display());
    Ok(())
}
