//! Editor collaborators consumed by the extension.
//!
//! The host editor implements these traits over its own window, view and
//! panel objects. Windows are passed explicitly into every operation that
//! touches the results panel, so each window resolves to its own panel
//! instance and nothing is shared across windows.

use std::fmt;
use std::path::{Path, PathBuf};

use lsp_types::Position;

/// Opaque identifier for a host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    /// Wraps a host-assigned window identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the host-assigned identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "window#{}", self.0)
    }
}

/// Opaque identifier for a host view (an editing surface over a document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    /// Wraps a host-assigned view identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the host-assigned identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "view#{}", self.0)
    }
}

/// Flags accompanying a panel append.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendOptions {
    /// Append even when the panel is read-only.
    pub force: bool,
    /// Scroll the panel to its end after appending.
    pub scroll_to_end: bool,
}

impl AppendOptions {
    /// Options used for result lines: forced and scrolled to the end.
    #[must_use]
    pub const fn forced() -> Self {
        Self {
            force: true,
            scroll_to_end: true,
        }
    }
}

/// Output panel used to list command results.
pub trait ResultsPanel {
    /// Records the directory result paths are relative to.
    fn set_base_dir(&mut self, base_dir: Option<&Path>);

    /// Toggles whether the user can edit the panel.
    fn set_read_only(&mut self, read_only: bool);

    /// Removes all panel content.
    fn clear(&mut self);

    /// Appends text to the end of the panel.
    fn append(&mut self, text: &str, options: AppendOptions);
}

/// A host window.
pub trait Window {
    /// Identifier of this window.
    fn id(&self) -> WindowId;

    /// Root directory of the project open in this window, if any.
    fn project_root(&self) -> Option<PathBuf>;

    /// Returns the window's results panel, creating it on first use.
    fn results_panel(&mut self) -> &mut dyn ResultsPanel;

    /// Reveals the results panel.
    fn show_results_panel(&mut self);

    /// Hides the results panel when it is shown.
    fn hide_results_panel(&mut self);

    /// Shows a transient message in the window's status bar.
    fn status_message(&mut self, message: &str);
}

/// A host view over one document.
pub trait View {
    /// Identifier of this view.
    fn id(&self) -> ViewId;

    /// Window hosting the view, or `None` when the view is detached.
    fn window_id(&self) -> Option<WindowId>;

    /// Local path of the document, or `None` for unsaved buffers.
    fn file_path(&self) -> Option<PathBuf>;

    /// Position of the primary cursor.
    fn cursor(&self) -> Option<Position>;

    /// Whether `position` sits on a word-constituent character.
    fn is_at_word(&self, position: Position) -> bool;

    /// The word surrounding `position`.
    fn word_at(&self, position: Position) -> Option<String>;
}

/// Access to live host objects when a deferred callback runs.
///
/// Lookups return `None` once the object has been closed, which is how
/// late responses detect that their originating context is gone.
pub trait EditorHost {
    /// Looks up a live window.
    fn window(&mut self, id: WindowId) -> Option<&mut dyn Window>;

    /// Whether the view is still open.
    fn is_view_valid(&self, id: ViewId) -> bool;

    /// Shows a transient message in the active window's status bar.
    fn status_message(&mut self, message: &str);
}
