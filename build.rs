// build.rs
//
// Embeds every TrueType/OpenType file found in `fonts/` so the registry can
// resolve faces without touching the filesystem at runtime. An empty or
// missing directory produces an empty bundle.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let fonts_dir = manifest_dir.join("fonts");
    println!("cargo:rerun-if-changed={}", fonts_dir.display());

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    if let Ok(entries) = fs::read_dir(&fonts_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
                .unwrap_or(false);
            if !is_font {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                println!("cargo:rerun-if-changed={}", path.display());
                files.push((name.to_string(), path.clone()));
            }
        }
    }
    files.sort();

    let mut out = String::new();
    out.push_str("// @generated by build.rs\n");
    out.push_str("pub(crate) static EMBEDDED_FONTS: &[(&str, &[u8])] = &[\n");
    for (name, path) in &files {
        let _ = writeln!(
            out,
            "    ({:?}, include_bytes!({:?})),",
            name,
            path.display().to_string()
        );
    }
    out.push_str("];\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap_or_else(|_| ".".into()));
    if let Err(e) = fs::write(out_dir.join("embedded_fonts.rs"), out) {
        eprintln!("failed to write embedded font table: {}", e);
        std::process::exit(1);
    }
}
