//! Routes traffic between the host session and the extension.
//!
//! The client owns the continuations of in-flight requests, keyed by request
//! id, and the notification relay once it is registered. Host collaborators
//! are passed in per call so the client never holds a borrow on them.

use std::collections::HashMap;

use lsp_types::request::Request;
use tracing::{debug, warn};

use crate::command::{CommandEvent, InvocationSnapshot, command_position, document_position};
use crate::errors::ExtensionError;
use crate::host::{EditorHost, View};
use crate::notifications::{NotificationRelay, ServerNotification};
use crate::protocol::{
    Implementations, JsonRpcMessage, JsonRpcNotification, JsonRpcResponse,
    build_implementations_request,
};
use crate::session::Session;

const CLIENT_TARGET: &str = "rls_extension::client";

/// Per-window extension state.
#[derive(Debug, Default)]
pub struct ExtensionClient {
    pending: HashMap<i64, InvocationSnapshot>,
    relay: Option<NotificationRelay>,
}

impl ExtensionClient {
    /// Creates a client with no pending requests and no relay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the notification relay.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::DuplicateRegistration`] when the relay is
    /// already installed.
    pub fn register_notifications(&mut self) -> Result<(), ExtensionError> {
        if self.relay.is_some() {
            return Err(ExtensionError::DuplicateRegistration);
        }
        self.relay = Some(NotificationRelay::new());
        debug!(target: CLIENT_TARGET, "notification relay registered");
        Ok(())
    }

    /// Whether the notification relay is installed.
    #[must_use]
    pub const fn notifications_registered(&self) -> bool {
        self.relay.is_some()
    }

    /// Number of requests awaiting a response.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Forgets everything tied to the session that just ended.
    ///
    /// Pending continuations are dropped, since their responses can no
    /// longer arrive, and the relay is removed so the next session can
    /// register its own. Returns the number of requests abandoned.
    pub fn session_closed(&mut self) -> usize {
        let abandoned = self.pending.len();
        self.pending.clear();
        self.relay = None;
        debug!(target: CLIENT_TARGET, abandoned, "session closed");
        abandoned
    }

    /// Runs the implementations command.
    ///
    /// Does nothing when there is no session or the view has no local file.
    /// A dead session and send failures are logged and swallowed. Returns the
    /// id of the request that was sent.
    pub fn run_implementations(
        &mut self,
        session: Option<&mut dyn Session>,
        view: &dyn View,
        event: Option<CommandEvent>,
    ) -> Option<i64> {
        match self.try_run_implementations(session, view, event) {
            Ok(id) => id,
            Err(error) => {
                warn!(target: CLIENT_TARGET, %error, "implementations request failed");
                None
            }
        }
    }

    fn try_run_implementations(
        &mut self,
        session: Option<&mut dyn Session>,
        view: &dyn View,
        event: Option<CommandEvent>,
    ) -> Result<Option<i64>, ExtensionError> {
        let Some(session) = session else {
            debug!(target: CLIENT_TARGET, view = %view.id(), "no session for view");
            return Ok(None);
        };
        if !session.is_alive() {
            return Err(ExtensionError::SessionUnavailable);
        }
        let Some(position) = command_position(view, event) else {
            return Ok(None);
        };
        let (Some(params), Some(snapshot)) = (
            document_position(view, position),
            InvocationSnapshot::capture(view, position),
        ) else {
            debug!(target: CLIENT_TARGET, view = %view.id(), "view has no local file");
            return Ok(None);
        };

        let request =
            build_implementations_request(&params).map_err(|source| ExtensionError::Codec {
                method: Implementations::METHOD.to_owned(),
                source,
            })?;
        let id = request.id;
        session
            .send_request(request)
            .map_err(|source| ExtensionError::Send {
                method: Implementations::METHOD.to_owned(),
                source,
            })?;

        debug!(
            target: CLIENT_TARGET,
            id,
            word = snapshot.word(),
            line = position.line,
            character = position.character,
            "sent implementations request"
        );
        self.pending.insert(id, snapshot);
        Ok(Some(id))
    }

    /// Routes one message from the server.
    pub fn handle_message(&mut self, message: JsonRpcMessage, host: &mut dyn EditorHost) {
        match message {
            JsonRpcMessage::Response(response) => self.handle_response(response, host),
            JsonRpcMessage::Notification(notification) => {
                self.handle_notification(&notification, host);
            }
            JsonRpcMessage::ServerRequest(request) => {
                warn!(
                    target: CLIENT_TARGET,
                    id = %request.id,
                    method = %request.method,
                    "ignoring server request"
                );
            }
        }
    }

    fn handle_response(&mut self, response: JsonRpcResponse, host: &mut dyn EditorHost) {
        let Some(snapshot) = response.id.and_then(|id| self.pending.remove(&id)) else {
            debug!(target: CLIENT_TARGET, id = ?response.id, "response for unknown request");
            return;
        };
        if let Some(error) = response.error {
            warn!(
                target: CLIENT_TARGET,
                id = ?response.id,
                code = error.code,
                message = %error.message,
                "implementations request returned an error"
            );
            return;
        }
        snapshot.complete(response.result, host);
    }

    /// Relays a notification when the relay is registered.
    ///
    /// Returns the recognised variant, or `None` before registration.
    pub fn handle_notification(
        &self,
        notification: &JsonRpcNotification,
        host: &mut dyn EditorHost,
    ) -> Option<ServerNotification> {
        let Some(relay) = self.relay else {
            debug!(
                target: CLIENT_TARGET,
                method = %notification.method,
                "notification before relay registration"
            );
            return None;
        };
        Some(relay.relay(notification, host))
    }
}
