//! Non-standard `rustDocument/*` methods spoken by `rls`.

use lsp_types::notification::Notification;
use lsp_types::request::Request;
use lsp_types::{Location, TextDocumentPositionParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::jsonrpc::JsonRpcRequest;

/// Request listing every implementor of the symbol at a position.
pub const IMPLEMENTATIONS_METHOD: &str = "rustDocument/implementations";
/// Notification sent when a build/check cycle starts.
pub const BEGIN_BUILD_METHOD: &str = "rustDocument/beginBuild";
/// Notification sent when diagnostics computation starts.
pub const DIAGNOSTICS_BEGIN_METHOD: &str = "rustDocument/diagnosticsBegin";
/// Notification sent when diagnostics computation finishes.
pub const DIAGNOSTICS_END_METHOD: &str = "rustDocument/diagnosticsEnd";

/// A document plus a 0-based position inside it.
pub type DocumentPosition = TextDocumentPositionParams;

/// `rustDocument/implementations`.
#[derive(Debug)]
pub enum Implementations {}

impl Request for Implementations {
    type Params = DocumentPosition;
    type Result = Option<Vec<Location>>;
    const METHOD: &'static str = IMPLEMENTATIONS_METHOD;
}

/// Builds the `rustDocument/implementations` request for a position.
///
/// The position is sent as-is; whether it names a symbol is decided by the
/// caller before the request is built.
///
/// # Errors
///
/// Returns the JSON error if the position cannot be encoded.
pub fn build_implementations_request(
    position: &DocumentPosition,
) -> Result<JsonRpcRequest, serde_json::Error> {
    let params = serde_json::to_value(position)?;
    Ok(JsonRpcRequest::new(Implementations::METHOD, Some(params)))
}

macro_rules! raw_params {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        ///
        /// `rls` does not document a payload for this notification, so the
        /// raw value is kept for handlers that want to inspect it.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            /// Payload exactly as received.
            pub raw: Value,
        }
    };
}

raw_params!(
    /// Payload of `rustDocument/beginBuild`.
    BuildBeginParams
);
raw_params!(
    /// Payload of `rustDocument/diagnosticsBegin`.
    DiagnosticsBeginParams
);
raw_params!(
    /// Payload of `rustDocument/diagnosticsEnd`.
    DiagnosticsEndParams
);

/// `rustDocument/beginBuild`.
#[derive(Debug)]
pub enum BeginBuild {}

impl Notification for BeginBuild {
    type Params = BuildBeginParams;
    const METHOD: &'static str = BEGIN_BUILD_METHOD;
}

/// `rustDocument/diagnosticsBegin`.
#[derive(Debug)]
pub enum DiagnosticsBegin {}

impl Notification for DiagnosticsBegin {
    type Params = DiagnosticsBeginParams;
    const METHOD: &'static str = DIAGNOSTICS_BEGIN_METHOD;
}

/// `rustDocument/diagnosticsEnd`.
#[derive(Debug)]
pub enum DiagnosticsEnd {}

impl Notification for DiagnosticsEnd {
    type Params = DiagnosticsEndParams;
    const METHOD: &'static str = DIAGNOSTICS_END_METHOD;
}
