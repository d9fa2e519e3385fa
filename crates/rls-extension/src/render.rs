//! Formatting of implementation results for the results panel.
//!
//! Positions arrive 0-based from the server and are shown 1-based. Paths are
//! shown relative to the project root when the file lives under it and
//! verbatim otherwise. Result order is the server's order.

use std::fmt;
use std::path::{Path, PathBuf};

use lsp_types::{Location, Uri};
use thiserror::Error;
use tracing::warn;

use crate::host::{AppendOptions, Window};
use crate::protocol::uri::uri_to_path;

const RENDER_TARGET: &str = "rls_extension::render";

/// Status shown when the server reports no implementations.
pub const NO_IMPLEMENTATIONS_MESSAGE: &str = "No implementations found";

/// Errors raised while rendering one location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The location does not point at a local file.
    #[error("location URI '{uri}' is not a local file")]
    NotLocalFile {
        /// Offending URI.
        uri: String,
    },
}

/// Displays `path` relative to `base_dir`.
///
/// Falls back to the path unchanged when there is no base directory or the
/// path is not under it.
#[must_use]
pub fn relative_display_path(path: &Path, base_dir: Option<&Path>) -> String {
    base_dir
        .and_then(|base| path.strip_prefix(base).ok())
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// One result line: ` ◌ {path} {row}:{column}` with 1-based coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    path: String,
    row: u64,
    column: u64,
}

impl RenderedLine {
    /// Renders a location against the base directory.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotLocalFile`] when the URI has no local path.
    pub fn from_location(
        location: &Location,
        base_dir: Option<&Path>,
    ) -> Result<Self, RenderError> {
        let path = local_path(&location.uri)?;
        let start = location.range.start;
        Ok(Self {
            path: relative_display_path(&path, base_dir),
            row: u64::from(start.line) + 1,
            column: u64::from(start.character) + 1,
        })
    }

    /// Displayed path.
    #[must_use]
    pub const fn path(&self) -> &str {
        self.path.as_str()
    }

    /// 1-based row.
    #[must_use]
    pub const fn row(&self) -> u64 {
        self.row
    }

    /// 1-based column.
    #[must_use]
    pub const fn column(&self) -> u64 {
        self.column
    }
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, " ◌ {} {}:{}", self.path, self.row, self.column)
    }
}

fn local_path(uri: &Uri) -> Result<PathBuf, RenderError> {
    uri_to_path(uri).ok_or_else(|| RenderError::NotLocalFile {
        uri: uri.as_str().to_owned(),
    })
}

/// Everything the results panel shows for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementationsListing {
    base_dir: Option<PathBuf>,
    header: String,
    lines: Vec<RenderedLine>,
}

impl ImplementationsListing {
    /// Renders a response.
    ///
    /// Locations that do not resolve to a local file are skipped with a
    /// warning; the rest keep their response order.
    #[must_use]
    pub fn new(
        word: &str,
        source_path: &Path,
        base_dir: Option<PathBuf>,
        locations: &[Location],
    ) -> Self {
        let base = base_dir.as_deref();
        let header = format!(
            "Implementations of \"{word}\" at {}:\n",
            relative_display_path(source_path, base)
        );
        let lines = locations
            .iter()
            .filter_map(|location| match RenderedLine::from_location(location, base) {
                Ok(line) => Some(line),
                Err(error) => {
                    warn!(target: RENDER_TARGET, %error, "skipping implementation");
                    None
                }
            })
            .collect();
        Self {
            base_dir,
            header,
            lines,
        }
    }

    /// Header naming the searched word and the source document.
    #[must_use]
    pub const fn header(&self) -> &str {
        self.header.as_str()
    }

    /// Rendered result lines.
    #[must_use]
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    /// Whether no line was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Writes the listing into the window's results panel.
    ///
    /// An empty listing hides the panel and leaves a status message instead;
    /// the panel is not touched.
    pub fn present(&self, window: &mut dyn Window) {
        if self.is_empty() {
            window.hide_results_panel();
            window.status_message(NO_IMPLEMENTATIONS_MESSAGE);
            return;
        }

        let panel = window.results_panel();
        panel.set_base_dir(self.base_dir.as_deref());
        panel.set_read_only(false);
        panel.clear();
        panel.append(&self.header, AppendOptions::default());
        for line in &self.lines {
            panel.append(&format!("{line}\n"), AppendOptions::forced());
        }
        panel.set_read_only(true);
        window.show_results_panel();
    }
}
