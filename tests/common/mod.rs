//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Once, OnceLock};

use vgplot::font::{Face, OpenTypeFace, add_font};

/// The checked-in DejaVu Sans face, parsed once per test binary.
pub fn dejavu_sans() -> Arc<dyn Face> {
    static FACE: OnceLock<Arc<dyn Face>> = OnceLock::new();
    FACE.get_or_init(|| {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSans.ttf");
        let data = std::fs::read(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        Arc::new(OpenTypeFace::from_vec(data).unwrap())
    })
    .clone()
}

/// Register DejaVu Sans under the PostScript names the tests draw with, so
/// they run without the Liberation fonts.
pub fn install_fonts() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        init_tracing();
        for name in ["Times-Roman", "Helvetica", "Courier"] {
            add_font(name, dejavu_sans());
        }
    });
}

/// Route library logs to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
