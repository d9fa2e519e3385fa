//! URI and path conversion utilities.
//!
//! Conversions go through the `url` crate so percent-encoding and platform
//! path rules are handled in one place.

use std::path::{Path, PathBuf};

use lsp_types::Uri;
use url::Url;

/// Converts a `file://` URI to a local path.
///
/// Returns `None` for other schemes and for URIs `url` cannot parse.
#[must_use]
pub fn uri_to_path(uri: &Uri) -> Option<PathBuf> {
    let url = Url::parse(uri.as_str()).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Converts an absolute local path to a `file://` URI.
///
/// Returns `None` for relative paths.
#[must_use]
pub fn path_to_uri(path: &Path) -> Option<Uri> {
    let url = Url::from_file_path(path).ok()?;
    url.as_str().parse().ok()
}
