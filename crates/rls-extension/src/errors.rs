//! Error types surfaced by the extension client.

use thiserror::Error;

use crate::session::SessionError;

/// Errors raised inside the extension layer.
///
/// None of these escape to the host as failures: callers turn them into a
/// status message or silence.
#[derive(Debug, Error)]
pub enum ExtensionError {
    /// The launcher program is not on the executable search path.
    #[error("{launcher} must be installed to run {server}")]
    MissingToolchain {
        /// Launcher that could not be resolved.
        launcher: String,
        /// Server that needed it.
        server: String,
    },

    /// The session was torn down before the request could be sent.
    #[error("language server session is no longer available")]
    SessionUnavailable,

    /// The host refused to dispatch a request.
    #[error("failed to send {method}: {source}")]
    Send {
        /// Method being sent.
        method: String,
        /// Failure reported by the session.
        #[source]
        source: SessionError,
    },

    /// Request parameters could not be encoded.
    #[error("failed to encode {method} parameters: {source}")]
    Codec {
        /// Method being encoded.
        method: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Notification handlers were registered twice on one session.
    #[error("notification handlers are already registered for this session")]
    DuplicateRegistration,
}

impl ExtensionError {
    /// Builds a `MissingToolchain` error.
    pub(crate) fn missing_toolchain(launcher: &str, server: &str) -> Self {
        Self::MissingToolchain {
            launcher: capitalise(launcher),
            server: server.to_owned(),
        }
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
