//! The "implementations" command.
//!
//! The command is offered only over a word in a view whose session supports
//! `implementationProvider`. Invoking it freezes an [`InvocationSnapshot`]
//! of the originating context; the response is rendered from that snapshot,
//! never from the view's state at callback time.

use std::path::{Path, PathBuf};

use lsp_types::{Location, Position, TextDocumentIdentifier};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::host::{EditorHost, View, ViewId, WindowId};
use crate::protocol::DocumentPosition;
use crate::protocol::uri::path_to_uri;
use crate::render::ImplementationsListing;
use crate::session::{IMPLEMENTATION_PROVIDER, Session};

const COMMAND_TARGET: &str = "rls_extension::command";

/// Why the command is not offered. Never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandUnavailable {
    /// No live session serves the view.
    #[error("no active language server session for the view")]
    NoActiveSession,
    /// The session did not advertise `implementationProvider`.
    #[error("language server does not support implementations")]
    UnsupportedCapability,
    /// The position is not over a word.
    #[error("position is not on a word")]
    NotOnWord,
}

/// Pointer event that triggered the command, such as a context-menu click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEvent {
    /// Document position under the pointer.
    pub position: Position,
}

/// Position the command acts on: the event position when present, the
/// primary cursor otherwise.
#[must_use]
pub fn command_position(view: &dyn View, event: Option<CommandEvent>) -> Option<Position> {
    event.map(|event| event.position).or_else(|| view.cursor())
}

/// Explains why the command is unavailable, or returns `Ok` when it may run.
///
/// # Errors
///
/// Returns the first unmet condition, checked in order: session,
/// capability, word.
pub fn availability(
    session: Option<&dyn Session>,
    view: &dyn View,
    event: Option<CommandEvent>,
) -> Result<(), CommandUnavailable> {
    let session = session
        .filter(|session| session.is_alive())
        .ok_or(CommandUnavailable::NoActiveSession)?;
    if !session.has_capability(IMPLEMENTATION_PROVIDER) {
        return Err(CommandUnavailable::UnsupportedCapability);
    }
    match command_position(view, event) {
        Some(position) if view.is_at_word(position) => Ok(()),
        _ => Err(CommandUnavailable::NotOnWord),
    }
}

/// Whether the host should offer the command.
#[must_use]
pub fn is_enabled(
    session: Option<&dyn Session>,
    view: &dyn View,
    event: Option<CommandEvent>,
) -> bool {
    match availability(session, view, event) {
        Ok(()) => true,
        Err(reason) => {
            debug!(target: COMMAND_TARGET, view = %view.id(), %reason, "command unavailable");
            false
        }
    }
}

/// Builds the request position for a view.
///
/// Returns `None` for views without a local file.
#[must_use]
pub fn document_position(view: &dyn View, position: Position) -> Option<DocumentPosition> {
    let uri = path_to_uri(&view.file_path()?)?;
    Some(DocumentPosition {
        text_document: TextDocumentIdentifier { uri },
        position,
    })
}

/// Context captured when the command is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSnapshot {
    window: WindowId,
    view: ViewId,
    position: Position,
    word: String,
    source_path: PathBuf,
}

impl InvocationSnapshot {
    /// Captures the originating context.
    ///
    /// Returns `None` when the view is detached from a window or has no
    /// local file.
    #[must_use]
    pub fn capture(view: &dyn View, position: Position) -> Option<Self> {
        Some(Self {
            window: view.window_id()?,
            view: view.id(),
            position,
            word: view.word_at(position).unwrap_or_default(),
            source_path: view.file_path()?,
        })
    }

    /// Window the command ran in.
    #[must_use]
    pub const fn window(&self) -> WindowId {
        self.window
    }

    /// View the command ran in.
    #[must_use]
    pub const fn view(&self) -> ViewId {
        self.view
    }

    /// Position the command ran at.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Word under the position at invocation time.
    #[must_use]
    pub const fn word(&self) -> &str {
        self.word.as_str()
    }

    /// Local path of the source document.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Renders a response into the originating window.
    ///
    /// Drops the response silently when the window or view has gone away.
    /// A missing or undecodable result renders as an empty listing.
    pub fn complete(&self, result: Option<Value>, host: &mut dyn EditorHost) {
        if !host.is_view_valid(self.view) {
            debug!(target: COMMAND_TARGET, view = %self.view, "dropping response for closed view");
            return;
        }
        let Some(window) = host.window(self.window) else {
            debug!(
                target: COMMAND_TARGET,
                window = %self.window,
                "dropping response for closed window"
            );
            return;
        };

        let locations = decode_locations(result);
        let listing = ImplementationsListing::new(
            &self.word,
            &self.source_path,
            window.project_root(),
            &locations,
        );
        debug!(
            target: COMMAND_TARGET,
            word = %self.word,
            results = listing.lines().len(),
            "rendering implementations"
        );
        listing.present(window);
    }
}

fn decode_locations(result: Option<Value>) -> Vec<Location> {
    let Some(value) = result else {
        return Vec::new();
    };
    match serde_json::from_value::<Option<Vec<Location>>>(value) {
        Ok(locations) => locations.unwrap_or_default(),
        Err(error) => {
            warn!(target: COMMAND_TARGET, %error, "malformed implementations response");
            Vec::new()
        }
    }
}
