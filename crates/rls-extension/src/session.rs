//! Abstraction over the host's language server session.

use std::error::Error;

use thiserror::Error;

use crate::protocol::JsonRpcRequest;

/// Server capability gating the implementations command.
pub const IMPLEMENTATION_PROVIDER: &str = "implementationProvider";

/// Errors reported by host session implementations.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SessionError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl SessionError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-friendly description without the optional source.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// A live connection to one running server, owned by the host.
///
/// The host correlates responses with requests by id and hands them back to
/// [`crate::ExtensionClient::handle_message`]; `send_request` only queues the
/// request and never waits for the reply.
pub trait Session {
    /// Whether the server advertised the named capability.
    fn has_capability(&self, capability: &str) -> bool;

    /// Whether the transport is still connected.
    fn is_alive(&self) -> bool;

    /// Queues a request for delivery to the server.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the host cannot dispatch the request.
    fn send_request(&mut self, request: JsonRpcRequest) -> Result<(), SessionError>;
}
