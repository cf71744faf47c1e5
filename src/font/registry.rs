//! Process-wide font registry: alias table, face cache, and font directories.
//!
//! Faces are parsed lazily, once per concrete name, and shared as
//! `Arc<dyn Face>`. Lookups take the cache's read lock; a miss takes the
//! write lock and re-checks before parsing so concurrent misses parse once.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::{Face, OpenTypeFace};
use crate::errors::FontError;
use crate::log::{debug, trace};

mod embedded {
    include!(concat!(env!("OUT_DIR"), "/embedded_fonts.rs"));
}

/// Environment variable listing font directories, in `PATH` syntax.
pub const FONT_PATH_VAR: &str = "VGFONTPATH";

/// PostScript family names and the concrete faces they resolve to.
///
/// Aliases come first so that [`postscript_name`] picks them over the
/// identity entries.
const ALIASES: &[(&str, &str)] = &[
    ("Courier", "LiberationMono-Regular"),
    ("Courier-Bold", "LiberationMono-Bold"),
    ("Courier-Oblique", "LiberationMono-Italic"),
    ("Courier-BoldOblique", "LiberationMono-BoldItalic"),
    ("Helvetica", "LiberationSans-Regular"),
    ("Helvetica-Bold", "LiberationSans-Bold"),
    ("Helvetica-Oblique", "LiberationSans-Italic"),
    ("Helvetica-BoldOblique", "LiberationSans-BoldItalic"),
    ("Times-Roman", "LiberationSerif-Regular"),
    ("Times-Bold", "LiberationSerif-Bold"),
    ("Times-Italic", "LiberationSerif-Italic"),
    ("Times-BoldItalic", "LiberationSerif-BoldItalic"),
];

type FaceCache = HashMap<String, Arc<dyn Face>>;

static CACHE: LazyLock<RwLock<FaceCache>> = LazyLock::new(|| RwLock::new(HashMap::new()));

static FONT_DIRS: LazyLock<RwLock<Vec<PathBuf>>> =
    LazyLock::new(|| RwLock::new(initial_font_dirs()));

fn initial_font_dirs() -> Vec<PathBuf> {
    let from_env: Vec<PathBuf> = std::env::var_os(FONT_PATH_VAR)
        .map(|v| std::env::split_paths(&v).filter(|p| !p.as_os_str().is_empty()).collect())
        .unwrap_or_default();
    if !from_env.is_empty() {
        return from_env;
    }
    vec![PathBuf::from("./fonts"), PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fonts")]
}

/// Directories searched, in order, before the embedded bundle.
pub fn font_dirs() -> Vec<PathBuf> {
    FONT_DIRS.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Replace the font search path. Faces already cached are kept.
pub fn set_font_dirs(dirs: Vec<PathBuf>) {
    debug!(?dirs, "font directories set");
    *FONT_DIRS.write().unwrap_or_else(PoisonError::into_inner) = dirs;
}

/// Alias names accepted by [`resolve_alias`], in table order.
pub fn aliases() -> impl Iterator<Item = &'static str> {
    ALIASES.iter().map(|&(alias, _)| alias)
}

/// Concrete face name for `name`: the aliased face for a PostScript family
/// name, or `name` itself when it already is a concrete face.
pub fn resolve_alias(name: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find_map(|&(alias, concrete)| (alias == name || concrete == name).then_some(concrete))
}

/// PostScript family name for a concrete face or alias, used by the PDF and
/// PostScript writers.
pub fn postscript_name(name: &str) -> Option<&'static str> {
    let concrete = resolve_alias(name)?;
    ALIASES.iter().find_map(|&(alias, c)| (c == concrete).then_some(alias))
}

/// Register `face` under `name`, shadowing any alias of the same name.
pub fn add_font(name: impl Into<String>, face: Arc<dyn Face>) {
    let name = name.into();
    debug!(%name, "registering font");
    CACHE.write().unwrap_or_else(PoisonError::into_inner).insert(name, face);
}

fn cached(name: &str) -> Option<Arc<dyn Face>> {
    CACHE.read().unwrap_or_else(PoisonError::into_inner).get(name).cloned()
}

/// Look up a face by registered name or alias, loading it on first use.
pub(crate) fn face(name: &str) -> Result<Arc<dyn Face>, FontError> {
    if let Some(face) = cached(name) {
        return Ok(face);
    }
    let concrete = resolve_alias(name).ok_or_else(|| FontError::Unknown {
        name: name.to_string(),
        available: aliases().collect::<Vec<_>>().join(", "),
    })?;
    if let Some(face) = cached(concrete) {
        return Ok(face);
    }

    let mut cache = CACHE.write().unwrap_or_else(PoisonError::into_inner);
    // another thread may have loaded it while we waited for the lock
    if let Some(face) = cache.get(concrete) {
        return Ok(face.clone());
    }
    let face = load(concrete, &font_dirs())?;
    cache.insert(concrete.to_string(), face.clone());
    debug!(concrete, "font cached");
    Ok(face)
}

/// Find and parse `<concrete>.ttf`, trying `dirs` in order and then the
/// embedded bundle. A file that exists but does not parse is an error; later
/// locations are not tried.
fn load(concrete: &str, dirs: &[PathBuf]) -> Result<Arc<dyn Face>, FontError> {
    let file = format!("{concrete}.ttf");
    for dir in dirs {
        let path = dir.join(&file);
        trace!(path = %path.display(), "probing font file");
        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(source) => return Err(FontError::Io { path, source }),
        };
        debug!(path = %path.display(), "loading font file");
        let face = OpenTypeFace::from_vec(data)
            .map_err(|source| FontError::Parse { file: path.display().to_string(), source })?;
        return Ok(Arc::new(face));
    }

    if let Some(&(_, data)) = embedded::EMBEDDED_FONTS.iter().find(|(name, _)| *name == file) {
        debug!(file = %file, "loading embedded font");
        let face = OpenTypeFace::from_static(data)
            .map_err(|source| FontError::Parse { file: file.clone(), source })?;
        return Ok(Arc::new(face));
    }

    Err(FontError::NotFound { file, searched: dirs.to_vec() })
}

/// File names in the embedded bundle.
pub fn embedded_fonts() -> impl Iterator<Item = &'static str> {
    embedded::EMBEDDED_FONTS.iter().map(|&(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::testing::FixedFace;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("vgplot-registry-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn aliases_resolve_to_liberation_faces() {
        assert_eq!(resolve_alias("Times-Roman"), Some("LiberationSerif-Regular"));
        assert_eq!(resolve_alias("Courier-BoldOblique"), Some("LiberationMono-BoldItalic"));
        assert_eq!(resolve_alias("Helvetica-Oblique"), Some("LiberationSans-Italic"));
        assert_eq!(resolve_alias("LiberationSans-Bold"), Some("LiberationSans-Bold"));
        assert_eq!(resolve_alias("Comic Sans"), None);
    }

    #[test]
    fn postscript_names_reverse_the_table() {
        assert_eq!(postscript_name("LiberationSerif-BoldItalic"), Some("Times-BoldItalic"));
        assert_eq!(postscript_name("Courier"), Some("Courier"));
        assert_eq!(postscript_name("Wingdings"), None);
    }

    #[test]
    fn unknown_name_lists_aliases() {
        let err = face("NoSuchFace-Regular").unwrap_err();
        match err {
            FontError::Unknown { name, available } => {
                assert_eq!(name, "NoSuchFace-Regular");
                assert!(available.contains("Times-Roman"));
                assert!(available.contains("Courier-BoldOblique"));
            }
            other => panic!("expected unknown font, got {other:?}"),
        }
    }

    #[test]
    fn added_fonts_shadow_lookup() {
        add_font("registry-test-face", Arc::new(FixedFace::times_like()));
        let face = face("registry-test-face").unwrap();
        assert_eq!(face.units_per_em(), 2048);
    }

    #[test]
    fn unparseable_file_is_an_error_without_fallback() {
        let bad = scratch_dir("bad");
        let good = scratch_dir("empty");
        std::fs::write(bad.join("LiberationMono-Bold.ttf"), b"not a font at all").unwrap();
        let err = load("LiberationMono-Bold", &[bad.clone(), good]).unwrap_err();
        match err {
            FontError::Parse { file, .. } => {
                assert!(file.ends_with("LiberationMono-Bold.ttf"), "{file}")
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_search_path() {
        let empty = scratch_dir("missing");
        if embedded_fonts().any(|f| f == "LiberationMono-Italic.ttf") {
            assert!(load("LiberationMono-Italic", std::slice::from_ref(&empty)).is_ok());
            return;
        }
        match load("LiberationMono-Italic", std::slice::from_ref(&empty)) {
            Err(FontError::NotFound { file, searched }) => {
                assert_eq!(file, "LiberationMono-Italic.ttf");
                assert_eq!(searched, vec![empty]);
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
