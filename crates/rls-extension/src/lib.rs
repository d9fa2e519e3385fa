//! `rls` extension client for a host editor's LSP framework.
//!
//! The host editor owns the transport, session lifecycle and UI. This crate
//! supplies what is specific to the Rust Language Server: the startup gate
//! on the `rustup` launcher, the `rustDocument/implementations` request and
//! its results panel, and the status messages raised by the server's build
//! and diagnostics notifications.
//!
//! Everything the host provides is reached through the collaborator traits in
//! [`host`] and [`session`], so the logic here can be exercised against
//! in-memory fakes without an editor or a running server.
#![deny(missing_docs)]

pub mod client;
pub mod command;
mod errors;
pub mod host;
pub mod integration;
pub mod notifications;
pub mod protocol;
pub mod render;
pub mod session;
pub mod telemetry;
pub mod toolchain;

#[cfg(test)]
mod tests;

pub use client::ExtensionClient;
pub use command::{CommandEvent, CommandUnavailable, InvocationSnapshot};
pub use errors::ExtensionError;
pub use host::{AppendOptions, EditorHost, ResultsPanel, View, ViewId, Window, WindowId};
pub use integration::RlsIntegration;
pub use notifications::{NotificationPayload, NotificationRelay, ServerNotification};
pub use protocol::{
    DocumentPosition, Implementations, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, JsonRpcServerRequest, RequestId, build_implementations_request,
};
pub use render::{ImplementationsListing, RenderError, RenderedLine, relative_display_path};
pub use session::{IMPLEMENTATION_PROVIDER, Session, SessionError};
pub use toolchain::{ExecutableLookup, SearchPathLookup, is_toolchain_available};
