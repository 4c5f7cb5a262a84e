//! Static client bundle with single-page-app fallback

use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// Serve files from `dir`, answering unknown paths with `dir/index.html`
///
/// `/` maps to the index. Paths escaping `dir` are rejected by `ServeDir`.
/// When the index itself is missing the fallback answers 404.
pub fn static_assets(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
