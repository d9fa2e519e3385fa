//! Status messages for the server's build and diagnostics notifications.
//!
//! Each recognised method maps statically to one [`ServerNotification`]
//! variant and one status text. The payload is decoded into its typed
//! struct and logged; no handler acts on its content yet.

use lsp_types::notification::Notification;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::host::EditorHost;
use crate::protocol::{
    BeginBuild, BuildBeginParams, DiagnosticsBegin, DiagnosticsBeginParams, DiagnosticsEnd,
    DiagnosticsEndParams, JsonRpcNotification,
};

const NOTIFICATIONS_TARGET: &str = "rls_extension::notifications";

/// Server-pushed notifications the relay recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerNotification {
    /// `rustDocument/beginBuild`.
    BuildBegin,
    /// `rustDocument/diagnosticsBegin`.
    DiagnosticsBegin,
    /// `rustDocument/diagnosticsEnd`.
    DiagnosticsEnd,
    /// Any other method.
    Unknown,
}

static NOTIFICATION_TABLE: [(&str, ServerNotification, &str); 3] = [
    (
        BeginBuild::METHOD,
        ServerNotification::BuildBegin,
        "Rust build started...",
    ),
    (
        DiagnosticsBegin::METHOD,
        ServerNotification::DiagnosticsBegin,
        "Rust diagnostics started...",
    ),
    (
        DiagnosticsEnd::METHOD,
        ServerNotification::DiagnosticsEnd,
        "Rust diagnostics done.",
    ),
];

impl ServerNotification {
    /// Maps a method name to its variant.
    #[must_use]
    pub fn from_method(method: &str) -> Self {
        NOTIFICATION_TABLE
            .iter()
            .find(|(name, _, _)| *name == method)
            .map_or(Self::Unknown, |(_, kind, _)| *kind)
    }

    /// Method name of a recognised notification.
    #[must_use]
    pub fn method(self) -> Option<&'static str> {
        self.entry().map(|(method, _, _)| *method)
    }

    /// Status text shown when the notification arrives.
    #[must_use]
    pub fn status_text(self) -> Option<&'static str> {
        self.entry().map(|(_, _, text)| *text)
    }

    fn entry(self) -> Option<&'static (&'static str, Self, &'static str)> {
        NOTIFICATION_TABLE.iter().find(|(_, kind, _)| *kind == self)
    }
}

/// Decoded payload of a recognised notification.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationPayload {
    /// Payload of `rustDocument/beginBuild`.
    BuildBegin(BuildBeginParams),
    /// Payload of `rustDocument/diagnosticsBegin`.
    DiagnosticsBegin(DiagnosticsBeginParams),
    /// Payload of `rustDocument/diagnosticsEnd`.
    DiagnosticsEnd(DiagnosticsEndParams),
}

impl NotificationPayload {
    /// Decodes the params of a recognised notification.
    ///
    /// Absent params decode as `null`. Returns `None` for unknown methods
    /// and for params that do not fit the payload type.
    #[must_use]
    pub fn decode(kind: ServerNotification, params: Option<&Value>) -> Option<Self> {
        match kind {
            ServerNotification::BuildBegin => decode_params(params).map(Self::BuildBegin),
            ServerNotification::DiagnosticsBegin => {
                decode_params(params).map(Self::DiagnosticsBegin)
            }
            ServerNotification::DiagnosticsEnd => decode_params(params).map(Self::DiagnosticsEnd),
            ServerNotification::Unknown => None,
        }
    }
}

fn decode_params<T: DeserializeOwned>(params: Option<&Value>) -> Option<T> {
    let value = params.cloned().unwrap_or(Value::Null);
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            warn!(target: NOTIFICATIONS_TARGET, %error, "notification payload did not decode");
            None
        }
    }
}

/// Turns recognised notifications into status messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationRelay;

impl NotificationRelay {
    /// Creates a relay.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Handles one notification.
    ///
    /// Recognised methods raise exactly one status message; unknown methods
    /// are ignored. Returns the recognised variant.
    pub fn relay(
        self,
        notification: &JsonRpcNotification,
        host: &mut dyn EditorHost,
    ) -> ServerNotification {
        let kind = ServerNotification::from_method(&notification.method);
        let Some(text) = kind.status_text() else {
            debug!(
                target: NOTIFICATIONS_TARGET,
                method = %notification.method,
                "ignoring unrecognised notification"
            );
            return kind;
        };

        let payload = NotificationPayload::decode(kind, notification.params.as_ref());
        debug!(
            target: NOTIFICATIONS_TARGET,
            method = %notification.method,
            payload = ?payload,
            "received notification"
        );
        host.status_message(text);
        kind
    }
}
